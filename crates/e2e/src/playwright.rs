//! Playwright browser automation
//!
//! Each test spec is compiled into one Node script that drives a
//! headless browser and reports every step as a JSON line on stdout.
//! The runner parses those lines back into [`StepResult`]s, so a step
//! failure carries its browser-side error message.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::spec::{AttributeAssertion, TestStep, WaitState};

/// Playwright browser handle for one spec execution
pub struct PlaywrightHandle {
    base_url: String,
    screenshot_dir: PathBuf,
    viewport_width: u32,
    viewport_height: u32,
    browser: Browser,
    headless: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Result of executing a test step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot_path: Option<PathBuf>,
}

/// One JSON line emitted by the generated script
#[derive(Debug, Deserialize)]
struct ScriptLine {
    step: String,
    ok: bool,
    #[serde(default)]
    ms: u64,
    #[serde(default)]
    error: Option<String>,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;

        Ok(Self {
            base_url: config.base_url,
            screenshot_dir: config.screenshot_dir,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            browser: config.browser,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Execute all steps of a spec in one browser session.
    ///
    /// The script stops at the first failing step; the returned vector
    /// covers only the steps that actually ran.
    pub async fn run_steps(&self, steps: &[TestStep]) -> E2eResult<Vec<StepResult>> {
        let script = self.build_script(steps);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("spec.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running Playwright script: {}", script_path.display());

        // Run from the process cwd so `require('playwright')` resolves
        // against the local node_modules.
        let output = TokioCommand::new("node").arg(&script_path).output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut results = Vec::new();
        for line in stdout.lines() {
            if let Ok(parsed) = serde_json::from_str::<ScriptLine>(line) {
                let screenshot_path = parsed
                    .step
                    .strip_prefix("screenshot:")
                    .map(|name| self.screenshot_dir.join(format!("{}.png", name)));
                results.push(StepResult {
                    success: parsed.ok,
                    step_name: parsed.step,
                    duration_ms: parsed.ms,
                    error: parsed.error,
                    screenshot_path,
                });
            }
        }

        // A crash before the first step (bad launch, missing browser)
        // produces no parseable lines; surface stderr instead.
        if !output.status.success() && !results.iter().any(|r| !r.success) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(E2eError::Playwright(format!(
                "script failed without a step result:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(results)
    }

    /// Human-readable name for a step
    pub fn step_name(step: &TestStep) -> String {
        match step {
            TestStep::Navigate { url, .. } => format!("navigate:{}", url),
            TestStep::Fill { selector, .. } => format!("fill:{}", selector),
            TestStep::Click { selector, .. } => format!("click:{}", selector),
            TestStep::Press { key, .. } => format!("press:{}", key),
            TestStep::Wait { selector, .. } => format!("wait:{}", selector),
            TestStep::Sleep { ms } => format!("sleep:{}ms", ms),
            TestStep::Assert { selector, .. } => format!("assert:{}", selector),
            TestStep::AssertUrl { contains, negated } => {
                if *negated {
                    format!("assert_url:!{}", contains)
                } else {
                    format!("assert_url:{}", contains)
                }
            }
            TestStep::Screenshot { name, .. } => format!("screenshot:{}", name),
        }
    }

    /// Build the Playwright script for a full spec
    pub fn build_script(&self, steps: &[TestStep]) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const BASE = {base_url};

  async function step(name, fn) {{
    const t0 = Date.now();
    try {{
      await fn();
      console.log(JSON.stringify({{ step: name, ok: true, ms: Date.now() - t0 }}));
    }} catch (error) {{
      console.log(JSON.stringify({{ step: name, ok: false, ms: Date.now() - t0, error: error.message }}));
      throw error;
    }}
  }}

  try {{
"#,
            browser = self.browser.as_str(),
            headless = self.headless,
            width = self.viewport_width,
            height = self.viewport_height,
            base_url = js_str(&self.base_url),
        ));

        for step in steps {
            script.push_str(&format!(
                "    await step({}, async () => {{\n{}\n    }});\n",
                js_str(&Self::step_name(step)),
                self.step_to_js(step)
            ));
        }

        script.push_str(
            r#"  } catch (error) {
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Convert a step to the body of its JavaScript closure
    fn step_to_js(&self, step: &TestStep) -> String {
        match step {
            TestStep::Navigate {
                url,
                wait_for_selector,
            } => {
                let mut js = format!("      await page.goto(BASE + {});", js_str(url));
                if let Some(sel) = wait_for_selector {
                    js.push_str(&format!(
                        "\n      await page.waitForSelector({});",
                        js_str(sel)
                    ));
                }
                js
            }
            TestStep::Fill { selector, value } => {
                format!(
                    "      await page.fill({}, {});",
                    js_str(selector),
                    js_str(value)
                )
            }
            TestStep::Click {
                selector,
                timeout_ms,
            } => {
                format!(
                    "      await page.click({}, {{ timeout: {} }});",
                    js_str(selector),
                    timeout_ms.unwrap_or(5000)
                )
            }
            TestStep::Press { selector, key } => match selector {
                Some(sel) => format!(
                    "      await page.press({}, {});",
                    js_str(sel),
                    js_str(key)
                ),
                None => format!("      await page.keyboard.press({});", js_str(key)),
            },
            TestStep::Wait {
                selector,
                timeout_ms,
                state,
            } => {
                let state_str = match state {
                    WaitState::Visible => "visible",
                    WaitState::Hidden => "hidden",
                    WaitState::Attached => "attached",
                    WaitState::Detached => "detached",
                };
                format!(
                    "      await page.waitForSelector({}, {{ state: '{}', timeout: {} }});",
                    js_str(selector),
                    state_str,
                    timeout_ms
                )
            }
            TestStep::Sleep { ms } => {
                format!("      await page.waitForTimeout({});", ms)
            }
            TestStep::Assert {
                selector,
                visible,
                text,
                text_contains,
                attribute,
                count,
                validation_message_contains,
            } => {
                let mut checks = Vec::new();
                let sel = js_str(selector);

                if let Some(vis) = visible {
                    if *vis {
                        checks.push(format!(
                            "      if (!(await page.isVisible({sel}))) throw new Error('expected visible: ' + {sel});"
                        ));
                    } else {
                        checks.push(format!(
                            "      if (!(await page.isHidden({sel}))) throw new Error('expected hidden: ' + {sel});"
                        ));
                    }
                }
                if let Some(expected) = text {
                    checks.push(format!(
                        "      {{ const t = ((await page.textContent({sel})) || '').trim(); if (t !== {expected}) throw new Error('text mismatch: \"' + t + '\"'); }}",
                        expected = js_str(expected)
                    ));
                }
                if let Some(needle) = text_contains {
                    checks.push(format!(
                        "      {{ const t = (await page.textContent({sel})) || ''; if (!t.includes({needle})) throw new Error('text missing {}: \"' + t + '\"'); }}",
                        needle.replace('\'', "\\'"),
                        needle = js_str(needle)
                    ));
                }
                if let Some(attr) = attribute {
                    checks.push(Self::attribute_check_js(&sel, attr));
                }
                if let Some(expected) = count {
                    checks.push(format!(
                        "      {{ const n = await page.locator({sel}).count(); if (n !== {expected}) throw new Error('count mismatch: ' + n); }}"
                    ));
                }
                if let Some(needle) = validation_message_contains {
                    // HTML5 constraint validation; wording varies by
                    // browser, so match case-insensitively.
                    checks.push(format!(
                        "      {{ const m = await page.$eval({sel}, el => el.validationMessage); if (!m.toLowerCase().includes({needle})) throw new Error('validation message: \"' + m + '\"'); }}",
                        needle = js_str(&needle.to_lowercase())
                    ));
                }

                checks.join("\n")
            }
            TestStep::AssertUrl { contains, negated } => {
                format!(
                    "      {{ const u = page.url(); if (u.includes({}) === {}) throw new Error('url check failed: ' + u); }}",
                    js_str(contains),
                    negated
                )
            }
            TestStep::Screenshot {
                name,
                selector,
                full_page,
            } => {
                let path = self.screenshot_dir.join(format!("{}.png", name));
                let path_js = js_str(&path.to_string_lossy());
                match selector {
                    Some(sel) => format!(
                        "      await page.locator({}).screenshot({{ path: {} }});",
                        js_str(sel),
                        path_js
                    ),
                    None => format!(
                        "      await page.screenshot({{ path: {}, fullPage: {} }});",
                        path_js, full_page
                    ),
                }
            }
        }
    }

    fn attribute_check_js(sel: &str, attr: &AttributeAssertion) -> String {
        let name = js_str(&attr.name);
        if let Some(value) = &attr.value {
            format!(
                "      {{ const v = (await page.getAttribute({sel}, {name})) || ''; if (v !== {expected}) throw new Error('attribute mismatch: \"' + v + '\"'); }}",
                expected = js_str(value)
            )
        } else if let Some(needle) = &attr.contains {
            format!(
                "      {{ const v = (await page.getAttribute({sel}, {name})) || ''; if (!v.includes({needle})) throw new Error('attribute missing substring: \"' + v + '\"'); }}",
                needle = js_str(needle)
            )
        } else {
            format!(
                "      {{ const v = await page.getAttribute({sel}, {name}); if (v === null) throw new Error('attribute absent'); }}"
            )
        }
    }
}

/// String literal safe to splice into the generated script
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> PlaywrightHandle {
        PlaywrightHandle {
            base_url: "https://app.example".to_string(),
            screenshot_dir: PathBuf::from("shots"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }

    #[test]
    fn test_script_wraps_steps_and_base_url() {
        let steps = vec![TestStep::Navigate {
            url: "/".to_string(),
            wait_for_selector: None,
        }];
        let script = handle().build_script(&steps);
        assert!(script.contains(r#"const BASE = "https://app.example";"#));
        assert!(script.contains(r#"await page.goto(BASE + "/");"#));
        assert!(script.contains("chromium.launch({ headless: true })"));
    }

    #[test]
    fn test_fill_values_are_escaped() {
        // SQL-injection payloads carry quotes; they must arrive intact.
        let steps = vec![TestStep::Fill {
            selector: "input[type='text'][required]".to_string(),
            value: "' OR '1'='1".to_string(),
        }];
        let script = handle().build_script(&steps);
        assert!(script.contains(r#"await page.fill("input[type='text'][required]", "' OR '1'='1");"#));
    }

    #[test]
    fn test_validation_message_check_is_lowercased() {
        let steps = vec![TestStep::Assert {
            selector: "input".to_string(),
            visible: None,
            text: None,
            text_contains: None,
            attribute: None,
            count: None,
            validation_message_contains: Some("Fill OUT this field".to_string()),
        }];
        let script = handle().build_script(&steps);
        assert!(script.contains("el.validationMessage"));
        assert!(script.contains(r#""fill out this field""#));
    }

    #[test]
    fn test_url_assertion_negation() {
        let steps = vec![TestStep::AssertUrl {
            contains: "chat".to_string(),
            negated: true,
        }];
        let script = handle().build_script(&steps);
        assert!(script.contains(r#"u.includes("chat") === true"#));
    }

    #[test]
    fn test_step_names() {
        assert_eq!(
            PlaywrightHandle::step_name(&TestStep::Sleep { ms: 250 }),
            "sleep:250ms"
        );
        assert_eq!(
            PlaywrightHandle::step_name(&TestStep::AssertUrl {
                contains: "chat".to_string(),
                negated: true
            }),
            "assert_url:!chat"
        );
    }
}
