use hcl_marshal::{
    marshal, marshal_to_ast, marshal_to_writer, Attribute, Block, Entry, Json, MarshalOption,
    MarshalOptions, Member, Record, Tag, Value,
};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::time::Duration;

fn render<T: Record>(value: &T) -> String {
    String::from_utf8(marshal(value, MarshalOptions::default()).unwrap()).unwrap()
}

#[derive(Default)]
struct Stage {
    name: String,
    replicas: u32,
}

impl Record for Stage {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value(Tag::label("name"), &self.name),
            Member::value(Tag::attr("replicas"), &self.replicas),
        ]
    }
}

#[derive(Default)]
struct Pipeline {
    stage: Stage,
}

impl Record for Pipeline {
    fn members(&self) -> Vec<Member<'_>> {
        vec![Member::record(Tag::block("stage"), &self.stage)]
    }
}

#[test]
fn test_nested_label_is_rendered_after_block_name() {
    let pipeline = Pipeline {
        stage: Stage {
            name: "prod".to_string(),
            replicas: 2,
        },
    };
    assert_eq!(render(&pipeline), "stage \"prod\" {\n  replicas = 2\n}\n");
}

#[derive(Default)]
struct Mixed {
    a: String,
    b: i64,
    inner: Stage,
    c: bool,
}

impl Record for Mixed {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value("a", &self.a),
            Member::value("b", &self.b),
            Member::record(Tag::block("inner"), &self.inner),
            Member::value("c", &self.c),
        ]
    }
}

#[test]
fn test_blank_lines_around_blocks() {
    let mixed = Mixed {
        a: "x".to_string(),
        b: -7,
        inner: Stage {
            name: "s".to_string(),
            replicas: 1,
        },
        c: true,
    };
    let expected = "a = \"x\"\nb = -7\n\ninner \"s\" {\n  replicas = 1\n}\n\nc = true\n";
    assert_eq!(render(&mixed), expected);
}

#[derive(Default)]
struct Fleet {
    stages: Vec<Stage>,
}

impl Record for Fleet {
    fn members(&self) -> Vec<Member<'_>> {
        vec![Member::records(Tag::block("stage"), &self.stages)]
    }
}

#[test]
fn test_sequence_of_records_becomes_sibling_blocks() {
    let fleet = Fleet {
        stages: ["one", "two", "three"]
            .iter()
            .enumerate()
            .map(|(i, name)| Stage {
                name: name.to_string(),
                replicas: i as u32,
            })
            .collect(),
    };
    let ast = marshal_to_ast(&fleet, MarshalOptions::default()).unwrap();
    assert_eq!(ast.entries.len(), 3);
    let names: Vec<_> = ast
        .entries
        .iter()
        .map(|entry| match entry {
            Entry::Block(block) => block.labels[0].clone(),
            Entry::Attribute(_) => panic!("expected only blocks"),
        })
        .collect();
    assert_eq!(names, vec!["one", "two", "three"]);
    assert!(ast.entries.iter().all(|entry| match entry {
        Entry::Block(block) => block.name == "stage" && !block.repeated,
        Entry::Attribute(_) => false,
    }));

    let text = render(&fleet);
    assert_eq!(
        text,
        "stage \"one\" {\n  replicas = 0\n}\n\nstage \"two\" {\n  replicas = 1\n}\n\nstage \"three\" {\n  replicas = 2\n}\n"
    );
}

#[test]
fn test_empty_sequence_of_records_prints_nothing() {
    assert_eq!(render(&Fleet::default()), "");
}

#[derive(Default)]
struct Profile {
    nickname: String,
    labels: Option<Vec<String>>,
    roles: Vec<String>,
    score: Json<u32>,
}

impl Record for Profile {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value(Tag::attr("nickname").optional(), &self.nickname),
            Member::value(Tag::attr("labels").optional(), &self.labels),
            Member::value(Tag::attr("roles").optional(), &self.roles),
            Member::value(Tag::attr("score").optional(), &self.score),
        ]
    }
}

#[test]
fn test_zero_valued_optional_fields_are_omitted() {
    let ast = marshal_to_ast(&Profile::default(), MarshalOptions::default()).unwrap();
    assert_eq!(
        ast.entries,
        vec![Entry::Attribute(Attribute::new("roles", Value::List(vec![])))]
    );
    assert_eq!(render(&Profile::default()), "roles = []\n");
}

#[test]
fn test_set_optional_fields_are_not_annotated() {
    let profile = Profile {
        nickname: "neo".to_string(),
        labels: Some(vec!["a".to_string(), "b".to_string()]),
        roles: vec!["admin".to_string()],
        score: Json(7),
    };
    assert_eq!(
        render(&profile),
        "nickname = \"neo\"\nlabels = [\"a\", \"b\"]\nroles = [\"admin\"]\nscore = \"7\"\n"
    );
}

#[derive(Default)]
struct Scalars {
    ratio: f64,
    big: u64,
    small: i8,
    wait: Duration,
    counts: HashMap<String, u32>,
    nested: Vec<Vec<u8>>,
    note: String,
}

impl Record for Scalars {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value("ratio", &self.ratio),
            Member::value("big", &self.big),
            Member::value("small", &self.small),
            Member::value("wait", &self.wait),
            Member::value("counts", &self.counts),
            Member::value("nested", &self.nested),
            Member::value("note", &self.note),
        ]
    }
}

#[test]
fn test_scalar_rendering() {
    let mut counts = HashMap::new();
    counts.insert("b".to_string(), 1);
    counts.insert("a".to_string(), 2);
    counts.insert("c".to_string(), 0);
    let scalars = Scalars {
        ratio: 0.75,
        big: u64::MAX,
        small: -3,
        wait: Duration::from_millis(1500),
        counts,
        nested: vec![vec![1, 2], vec![]],
        note: "say \"hi\"\n".to_string(),
    };
    let expected = "ratio = 0.75\n\
                    big = 18446744073709551615\n\
                    small = -3\n\
                    wait = \"1.5s\"\n\
                    counts = {\n  \"a\": 2,\n  \"b\": 1,\n  \"c\": 0,\n}\n\
                    nested = [[1, 2], []]\n\
                    note = \"say \\\"hi\\\"\\n\"\n";
    assert_eq!(render(&scalars), expected);
}

#[derive(Default)]
struct Limits {
    quotas: BTreeMap<String, BTreeMap<String, u32>>,
}

impl Record for Limits {
    fn members(&self) -> Vec<Member<'_>> {
        vec![Member::value(Tag::attr("quotas"), &self.quotas)]
    }
}

#[derive(Default)]
struct Tenant {
    limits: Limits,
}

impl Record for Tenant {
    fn members(&self) -> Vec<Member<'_>> {
        vec![Member::record(Tag::block("limits"), &self.limits)]
    }
}

#[test]
fn test_nested_map_inside_block() {
    let mut cpu = BTreeMap::new();
    cpu.insert("max".to_string(), 4);
    let mut quotas = BTreeMap::new();
    quotas.insert("cpu".to_string(), cpu);
    quotas.insert("disk".to_string(), BTreeMap::new());
    let tenant = Tenant {
        limits: Limits { quotas },
    };
    let expected = "limits {\n\
                    \x20 quotas = {\n\
                    \x20   \"cpu\": {\n\
                    \x20       \"max\": 4,\n\
                    \x20     },\n\
                    \x20   \"disk\": {\n\
                    \x20     },\n\
                    \x20 }\n\
                    }\n";
    assert_eq!(render(&tenant), expected);
}

#[derive(Default)]
struct Tls {
    cert: String,
}

impl Record for Tls {
    fn members(&self) -> Vec<Member<'_>> {
        vec![Member::value(Tag::attr("cert"), &self.cert)]
    }
}

#[derive(Default)]
struct Listener {
    port: u16,
    tls: Option<Tls>,
}

impl Record for Listener {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value(Tag::attr("port"), &self.port),
            Member::optional_record(Tag::block("tls"), &self.tls),
        ]
    }
}

#[test]
fn test_optional_record_present_and_absent() {
    let with_tls = Listener {
        port: 443,
        tls: Some(Tls {
            cert: "/etc/cert.pem".to_string(),
        }),
    };
    assert_eq!(
        render(&with_tls),
        "port = 443\n\ntls {\n  cert = \"/etc/cert.pem\"\n}\n"
    );

    // An absent record contributes no body, but its block is still emitted.
    let without = Listener { port: 80, tls: None };
    let ast = marshal_to_ast(&without, MarshalOptions::default()).unwrap();
    assert_eq!(ast.entries[1], Entry::Block(Block::new("tls")));
    assert_eq!(render(&without), "port = 80\n\ntls {\n}\n");
}

#[derive(Default)]
struct Untagged {
    name: String,
    tls: Tls,
}

impl Record for Untagged {
    fn members(&self) -> Vec<Member<'_>> {
        vec![
            Member::value("name", &self.name),
            Member::record("tls", &self.tls),
        ]
    }
}

#[test]
fn test_infer_tags_turns_records_into_blocks() {
    let value = Untagged {
        name: "edge".to_string(),
        tls: Tls {
            cert: "c".to_string(),
        },
    };
    let options: MarshalOptions = [MarshalOption::InferTags(true)].into_iter().collect();
    let out = marshal(&value, options).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "name = \"edge\"\n\ntls {\n  cert = \"c\"\n}\n"
    );
}

#[test]
fn test_marshal_to_writer_file() {
    let pipeline = Pipeline {
        stage: Stage {
            name: "qa".to_string(),
            replicas: 1,
        },
    };
    let ast = marshal_to_ast(&pipeline, MarshalOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.hcl");
    let mut file = fs::File::create(&path).unwrap();
    marshal_to_writer(&ast, &mut file).unwrap();
    drop(file);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "stage \"qa\" {\n  replicas = 1\n}\n"
    );
}
