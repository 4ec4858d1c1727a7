//! `anvil ask` command

use anyhow::{Context, Result};
use anvil_core::IntRange;
use serde_json::Value;

use crate::cli::{AskArgs, QuestionKind};
use crate::handler::UserInputHandler;

/// Ask the question described by `args` and return the answer as JSON
///
/// `Ok(None)` means the prompt ended without an answer.
pub async fn ask(handler: &UserInputHandler, args: &AskArgs) -> Result<Option<Value>> {
    let question = args.question.as_str();
    let answer = match args.kind {
        QuestionKind::Text => handler
            .ask_text(question, args.default.as_deref())
            .await?
            .map(Value::from),
        QuestionKind::Required => handler.ask_required(question).await?.map(Value::from),
        QuestionKind::YesNo => handler.ask_yes_no(question).await?.map(Value::from),
        QuestionKind::Confirm => {
            let default = match args.default.as_deref() {
                Some(text) => parse_bool(text)?,
                None => true,
            };
            handler
                .ask_confirm(question, default)
                .await?
                .map(Value::from)
        }
        QuestionKind::Int => handler
            .ask_int(question, int_range(args)?)
            .await?
            .map(Value::from),
        QuestionKind::Select => {
            let default = match args.default.as_deref() {
                Some(text) => args
                    .options
                    .iter()
                    .position(|option| option == text)
                    .with_context(|| format!("Default '{text}' is not one of the options"))?,
                None => 0,
            };
            handler
                .select_option(question, args.options.clone(), default)
                .await?
                .map(Value::from)
        }
    };
    Ok(answer)
}

fn parse_bool(text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => anyhow::bail!("Default '{other}' is not yes or no"),
    }
}

fn int_range(args: &AskArgs) -> Result<IntRange> {
    let min = args.min.unwrap_or(0);
    let mut range = match args.max {
        Some(max) if min > max => anyhow::bail!("--min {min} is greater than --max {max}"),
        Some(max) => IntRange::between(min, max),
        None => IntRange::at_least(min),
    };
    if let Some(text) = args.default.as_deref() {
        let default: i64 = text
            .trim()
            .parse()
            .with_context(|| format!("Default '{text}' is not an integer"))?;
        range = range.with_default(default);
    }
    Ok(range)
}
