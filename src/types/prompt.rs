//! Small inquire helpers shared by the interactive constructors.

use anyhow::Result;
use inquire::{
    validator::{ErrorMessage, Validation},
    CustomUserError,
};

fn validator_number(input: &str) -> Result<Validation, CustomUserError> {
    match input.trim().parse::<i32>() {
        Ok(_) => Ok(Validation::Valid),
        Err(_) => Ok(Validation::Invalid(ErrorMessage::Custom(
            "Input isn't a valid number".to_string(),
        ))),
    }
}

fn validator_number_or_empty(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        return Ok(Validation::Valid);
    }
    validator_number(input)
}

/// Rejects input the line codec would refuse to write.
pub(crate) fn validator_field(
    delimiter: char,
) -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone {
    move |input: &str| {
        if input.contains(delimiter) {
            return Ok(Validation::Invalid(ErrorMessage::Custom(format!(
                "Input may not contain {delimiter:?}"
            ))));
        }
        Ok(Validation::Valid)
    }
}

pub(crate) fn prompt_text(prompt: &str, delimiter: char) -> Result<String> {
    let validator_non_empty = |input: &str| -> Result<Validation, CustomUserError> {
        if input.trim().is_empty() {
            return Ok(Validation::Invalid("Empty string not allowed".into()));
        }
        Ok(Validation::Valid)
    };
    Ok(inquire::Text::new(prompt)
        .with_validator(validator_non_empty)
        .with_validator(validator_field(delimiter))
        .prompt()?)
}

pub(crate) fn prompt_number(prompt: &str, initial_value: Option<i32>) -> Result<i32> {
    let initial_value = initial_value.map(|x| x.to_string());
    let mut prompt = inquire::Text::new(prompt).with_validator(validator_number);
    if let Some(s) = &initial_value {
        prompt = prompt.with_initial_value(s);
    }
    Ok(prompt.prompt()?.trim().parse::<i32>()?)
}

pub(crate) fn prompt_number_skippable(prompt: &str) -> Result<Option<i32>> {
    let input = inquire::Text::new(prompt)
        .with_validator(validator_number_or_empty)
        .prompt_skippable()?
        .filter(|x| !x.trim().is_empty());
    Ok(match input {
        Some(s) => Some(s.trim().parse::<i32>()?),
        None => None,
    })
}
