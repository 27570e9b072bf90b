//! Prompt banks and category thresholds
//!
//! Prompts live in CSV files with a `prompt` column, one prompt per row.
//! Row order is preserved; content is not validated.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Categories of prompts exercised against the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCategory {
    Tutor,
    LiveData,
    BasicConversation,
    Comparison,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 4] = [
        PromptCategory::Tutor,
        PromptCategory::LiveData,
        PromptCategory::BasicConversation,
        PromptCategory::Comparison,
    ];

    /// Minimum acceptable judge score for this category.
    /// Comparison prompts are held to a higher bar.
    pub fn min_score(&self) -> u8 {
        match self {
            PromptCategory::Comparison => 7,
            _ => 6,
        }
    }

    /// Conventional bank file name for this category
    pub fn bank_file(&self) -> &'static str {
        match self {
            PromptCategory::Tutor => "stock_tutor_prompts.csv",
            PromptCategory::LiveData => "live_data_prompts.csv",
            PromptCategory::BasicConversation => "basic_conversation_prompts.csv",
            PromptCategory::Comparison => "comparison_prompts.csv",
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PromptCategory::Tutor => "Stock Tutor",
            PromptCategory::LiveData => "Live Data",
            PromptCategory::BasicConversation => "Basic Conversation",
            PromptCategory::Comparison => "Comparison",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Deserialize)]
struct PromptRow {
    prompt: String,
}

/// Load prompts from a CSV bank, in file order.
///
/// Propagates I/O and parse errors; empty prompt strings pass through.
pub fn load_prompts(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut prompts = Vec::new();
    for row in reader.deserialize::<PromptRow>() {
        prompts.push(row?.prompt);
    }
    Ok(prompts)
}
