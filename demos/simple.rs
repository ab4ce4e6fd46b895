use hcl_marshal::{marshal, marshal_schema, MarshalOptions, Member, Record, Tag};
use std::time::Duration;

#[derive(Default)]
struct Backend {
    name: String,
    address: String,
    weight: u32,
}

impl Record for Backend {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value(Tag::label("name"), &self.name),
            Member::value(Tag::attr("address"), &self.address),
            Member::value(Tag::attr("weight").optional(), &self.weight),
        ]
    }
}

#[derive(Default)]
struct Proxy {
    listen: String,
    idle_timeout: Duration,
    backends: Vec<Backend>,
}

impl Record for Proxy {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value(
                Tag::attr("listen").comment("Address to accept connections on."),
                &self.listen,
            ),
            Member::value(Tag::attr("idle_timeout"), &self.idle_timeout),
            Member::records(Tag::block("backend"), &self.backends),
        ]
    }
}

fn main() {
    let proxy = Proxy {
        listen: "0.0.0.0:8080".to_string(),
        idle_timeout: Duration::from_secs(90),
        backends: vec![
            Backend {
                name: "blue".to_string(),
                address: "10.0.0.1:9000".to_string(),
                weight: 3,
            },
            Backend {
                name: "green".to_string(),
                address: "10.0.0.2:9000".to_string(),
                weight: 0,
            },
        ],
    };

    match marshal(&proxy, MarshalOptions::default()) {
        Ok(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
        Err(e) => eprintln!("Failed to marshal: {e:?}"),
    }

    match marshal_schema::<Proxy>(MarshalOptions::default()) {
        Ok(bytes) => println!("Schema:\n{}", String::from_utf8_lossy(&bytes)),
        Err(e) => eprintln!("Failed to build schema: {e:?}"),
    }
}
