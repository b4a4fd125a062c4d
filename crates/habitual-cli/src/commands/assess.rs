use clap::Args;
use habitual_core::assessment::{self, QUESTIONS};
use serde_json::json;

#[derive(Args)]
pub struct AssessArgs {
    /// One y/n per question in order (e.g. yynnyyyn...); omit to list questions
    #[arg(long)]
    answers: Option<String>,
}

fn parse_answers(raw: &str) -> Result<Vec<bool>, String> {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_lowercase() {
            'y' => Ok(true),
            'n' => Ok(false),
            other => Err(format!("invalid answer '{other}': use y or n")),
        })
        .collect()
}

pub fn run(args: AssessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(raw) = args.answers else {
        println!("{}", serde_json::to_string_pretty(&QUESTIONS)?);
        return Ok(());
    };

    let answers = parse_answers(&raw)?;
    if answers.len() > QUESTIONS.len() {
        return Err(format!(
            "expected at most {} answers, got {}",
            QUESTIONS.len(),
            answers.len()
        )
        .into());
    }

    let scores = assessment::score(&answers);
    let suggestions = assessment::suggested_categories(&scores);
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "scores": scores,
            "suggested_categories": suggestions,
        }))?
    );
    Ok(())
}
