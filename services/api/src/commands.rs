use crate::infra::{build_service, parse_answer, parse_mode};
use clap::Args;
use craftfinder::config::{AppConfig, ConfigError, RulesSource};
use craftfinder::error::AppError;
use craftfinder::quiz::{MatchingMode, QuestionCatalog, Recommendation, ResponseMap, SubmitRequest};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Answer as QUESTION=OPTION[,OPTION]; leave the option empty to skip (repeatable)
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, Vec<String>)>,
    /// Matching strategy: rules or describe
    #[arg(long, value_parser = parse_mode, default_value = "rules")]
    pub(crate) mode: MatchingMode,
    /// Rule table (JSON or CSV) overriding the configured source
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) fn run_questions() {
    let catalog = QuestionCatalog::standard();
    println!("CraftFinder question catalog (v{})", catalog.version());

    for (index, question) in catalog.flow_questions().into_iter().enumerate() {
        println!(
            "\n{}. [{}] {} ({})",
            index + 1,
            question.id,
            question.prompt,
            question.kind.label()
        );
        for option in &question.options {
            println!("   - {:<24} {}", option.id, option.label);
        }
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.rules {
        config.scoring.rules = RulesSource::Path(path);
    }

    let service = build_service(&config.scoring)?;
    if args.mode == MatchingMode::Rules && !service.has_rules() {
        return Err(ConfigError::RulesUnavailable.into());
    }

    let responses: ResponseMap = args.answers.into_iter().collect();
    let summary = service.summarize(&responses);
    let response = service
        .submit(SubmitRequest::new(responses, args.mode))
        .map_err(|_| AppError::Config(ConfigError::RulesUnavailable))?;

    println!("CraftFinder recommendation ({})", args.mode.label());
    match response.result {
        Recommendation::Persona(persona) => {
            println!("{}", persona.title);
            println!("{}", persona.blurb);
        }
        Recommendation::Paragraph { paragraph } => println!("{paragraph}"),
    }

    println!(
        "\nAnswered {} of {} captured questions ({} skipped)",
        summary.answered, summary.captured, summary.skipped
    );
    for answer in &summary.answers {
        let detail = if answer.option_labels.is_empty() {
            answer.status.label().to_string()
        } else {
            answer.option_labels.join(", ")
        };
        println!("- {}: {}", answer.question_prompt, detail);
    }

    Ok(())
}
