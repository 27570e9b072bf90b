//! Declarative YAML test specification

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::E2eResult;

/// A complete test specification parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique name for this test
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering tests
    #[serde(default)]
    pub tags: Vec<String>,

    /// Viewport size for the browser
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,
}

fn default_viewport() -> Viewport {
    Viewport {
        width: 1280,
        height: 720,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// A single step in a test
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a URL (relative to base)
    Navigate {
        url: String,
        #[serde(default)]
        wait_for_selector: Option<String>,
    },

    /// Fill an input field
    Fill {
        selector: String,
        value: String,
    },

    /// Click an element
    Click {
        selector: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Press a key, optionally on a specific element
    Press {
        #[serde(default)]
        selector: Option<String>,
        key: String,
    },

    /// Wait for an element to reach a state
    Wait {
        selector: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        #[serde(default)]
        state: WaitState,
    },

    /// Wait for a fixed amount of time (use sparingly)
    Sleep {
        ms: u64,
    },

    /// Assert something about an element
    Assert {
        selector: String,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        text_contains: Option<String>,
        #[serde(default)]
        attribute: Option<AttributeAssertion>,
        #[serde(default)]
        count: Option<usize>,
        /// HTML5 constraint-validation message (case-insensitive match)
        #[serde(default)]
        validation_message_contains: Option<String>,
    },

    /// Assert on the current page URL
    AssertUrl {
        contains: String,
        /// When true, the substring must be absent
        #[serde(default)]
        negated: bool,
    },

    /// Take a screenshot
    Screenshot {
        name: String,
        #[serde(default)]
        selector: Option<String>,
        #[serde(default)]
        full_page: bool,
    },
}

fn default_wait_timeout() -> u64 {
    5000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeAssertion {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub contains: Option<String>,
}

impl TestSpec {
    /// Parse a test spec from a YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a test spec from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all test specs from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut specs = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            specs.push(Self::from_file(entry.path())?);
        }

        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_spec() {
        let yaml = r#"
name: login-valid
description: Valid credentials land on the chat page
tags:
  - auth
  - smoke
steps:
  - action: navigate
    url: /
  - action: fill
    selector: "input[type='text'][required]"
    value: demo_user
  - action: fill
    selector: "input[type='password'][required]"
    value: demo_pass
  - action: click
    selector: "button[type='submit']"
  - action: assert_url
    contains: chat
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "login-valid");
        assert_eq!(spec.steps.len(), 5);
        assert!(spec.tags.contains(&"auth".to_string()));
        assert!(matches!(
            spec.steps[4],
            TestStep::AssertUrl { ref contains, negated: false } if contains == "chat"
        ));
    }

    #[test]
    fn test_parse_validation_message_assertion() {
        let yaml = r#"
name: empty-username
steps:
  - action: assert
    selector: "input[type='text'][required]"
    validation_message_contains: fill out this field
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        match &spec.steps[0] {
            TestStep::Assert {
                validation_message_contains: Some(msg),
                ..
            } => assert_eq!(msg, "fill out this field"),
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negated_url_assertion() {
        let yaml = r#"
name: login-invalid
steps:
  - action: assert_url
    contains: chat
    negated: true
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert!(matches!(
            spec.steps[0],
            TestStep::AssertUrl { negated: true, .. }
        ));
    }

    #[test]
    fn test_viewport_defaults() {
        let yaml = "name: t\nsteps: []\n";
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.viewport.width, 1280);
        assert_eq!(spec.viewport.height, 720);
    }
}
