//! Interactive console prompts.
//!
//! Collects one watermarking job at a time from the terminal: input file,
//! optional cosmetic filter, and the watermark to apply. Built on
//! `dialoguer` confirm/input/select widgets.

use dialoguer::{Confirm, Input, Select};
use thiserror::Error;

use crate::config::Config;
use crate::filter::ImageFilter;
use crate::pipeline::{WatermarkJob, WatermarkKind};

/// Menu labels for the cosmetic filters.
const EDIT_MODES: [&str; 4] = [
    "Make image brighter",
    "Increase contrast",
    "Make image b&w",
    "Invert image",
];

/// Menu labels for the watermark kinds.
const WATERMARK_MODES: [&str; 2] = ["Text watermark", "Image watermark"];

/// Errors raised when the console cannot be read.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to read console input: {0}")]
    ReadError(String),
}

impl From<dialoguer::Error> for PromptError {
    fn from(e: dialoguer::Error) -> Self {
        PromptError::ReadError(e.to_string())
    }
}

/// Show the welcome banner and ask whether to continue.
pub fn welcome(images_dir: &str) -> Result<bool, PromptError> {
    let ready = Confirm::new()
        .with_prompt(welcome_message(images_dir))
        .default(true)
        .interact()?;
    Ok(ready)
}

/// Walk the user through one job: file, filter, watermark.
pub fn next_job(config: &Config) -> Result<WatermarkJob, PromptError> {
    let input_file: String = Input::new()
        .with_prompt("What file do you want to mark?")
        .default("test.jpg".to_string())
        .interact_text()?;

    let filter = if Confirm::new()
        .with_prompt("Do you want to edit image?")
        .default(true)
        .interact()?
    {
        let index = Select::new()
            .with_prompt("Select edit mode:")
            .items(&EDIT_MODES)
            .default(0)
            .interact()?;
        let label = EDIT_MODES.get(index).copied().unwrap_or("");
        ImageFilter::from_selection(label, config.filter.intensity)
    } else {
        ImageFilter::None
    };

    let mode = Select::new()
        .with_prompt("Select watermark mode:")
        .items(&WATERMARK_MODES)
        .default(0)
        .interact()?;

    let watermark = if mode == 0 {
        let text: String = Input::new()
            .with_prompt("Type your watermark text:")
            .allow_empty(true)
            .interact_text()?;
        WatermarkKind::Text { text }
    } else {
        let file: String = Input::new()
            .with_prompt("Type your watermark name:")
            .default("logo.png".to_string())
            .interact_text()?;
        WatermarkKind::Image { file }
    };

    Ok(WatermarkJob {
        input_file,
        filter,
        watermark,
    })
}

fn welcome_message(images_dir: &str) -> String {
    format!(
        "Hi! Welcome to \"Watermark manager\". Copy your image files to `{}` folder. \
         Then you'll be able to use them in the app. Are you ready?",
        images_dir
    )
}
