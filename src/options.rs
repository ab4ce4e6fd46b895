use serde::{Deserialize, Serialize};

/// Settings that steer how records are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalOptions {
    /// Treat nested records that carry no explicit tag as blocks instead of rejecting them.
    pub infer_tags: bool,
}

/// A single option, applied in order on top of [`MarshalOptions::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarshalOption {
    InferTags(bool),
}

impl MarshalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn infer_tags(mut self, infer: bool) -> Self {
        self.infer_tags = infer;
        self
    }

    pub fn apply(&mut self, option: MarshalOption) {
        match option {
            MarshalOption::InferTags(infer) => self.infer_tags = infer,
        }
    }
}

impl FromIterator<MarshalOption> for MarshalOptions {
    fn from_iter<I: IntoIterator<Item = MarshalOption>>(iter: I) -> Self {
        let mut options = MarshalOptions::default();
        for option in iter {
            options.apply(option);
        }
        options
    }
}

impl From<&[MarshalOption]> for MarshalOptions {
    fn from(options: &[MarshalOption]) -> Self {
        options.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{MarshalOption, MarshalOptions};

    #[test]
    fn test_later_options_override_earlier() {
        let options: MarshalOptions = [
            MarshalOption::InferTags(true),
            MarshalOption::InferTags(false),
        ]
        .into_iter()
        .collect();
        assert!(!options.infer_tags);

        let options = MarshalOptions::from(&[MarshalOption::InferTags(true)][..]);
        assert!(options.infer_tags);
    }

    #[test]
    fn test_options_from_json_config() {
        let options: MarshalOptions = serde_json::from_str(r#"{ "infer_tags": true }"#).unwrap();
        assert_eq!(options, MarshalOptions::new().infer_tags(true));

        let options: MarshalOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, MarshalOptions::default());
    }
}
