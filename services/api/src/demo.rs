use crate::infra::{load_engine, parse_answer_arg};
use clap::Args;
use rapport::assessment::{
    Answer, AnswerSet, Assessment, AssessmentSession, CatalogPreset, CriteriaCatalog,
    CriterionKind, ScoreEngine,
};
use rapport::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Answer as key=value; ratings are integers, yes/no criteria take true/false
    #[arg(long = "answer", short = 'a', value_parser = parse_answer_arg)]
    pub(crate) answers: Vec<(String, Answer)>,
    /// Show a partial score even if some criteria are unanswered
    #[arg(long)]
    pub(crate) preview: bool,
}

pub(crate) fn run_catalog(preset: CatalogPreset) -> Result<(), AppError> {
    let engine = load_engine(preset)?;
    render_catalog(engine.catalog());
    Ok(())
}

pub(crate) fn run_score(preset: CatalogPreset, args: ScoreArgs) -> Result<(), AppError> {
    let engine = load_engine(preset)?;
    let assessment = match score_answers(&engine, args) {
        Ok(assessment) => assessment,
        Err(AppError::Incomplete(violation)) => {
            print!("{}", missing_prompt(engine.catalog(), &violation.missing));
            return Err(AppError::Incomplete(violation));
        }
        Err(err) => return Err(err),
    };
    render_assessment(engine.catalog(), &assessment);
    Ok(())
}

fn score_answers(engine: &Arc<ScoreEngine>, args: ScoreArgs) -> Result<Assessment, AppError> {
    let ScoreArgs { answers, preview } = args;
    let answers: AnswerSet = answers.into_iter().collect();
    answers.ensure_known(engine.catalog())?;

    if preview {
        Ok(engine.preview(&answers))
    } else {
        Ok(engine.assess(&answers)?)
    }
}

pub(crate) fn run_demo(preset: CatalogPreset) -> Result<(), AppError> {
    let engine = load_engine(preset)?;
    println!("Relationship self-assessment demo ({preset} catalog)");

    for (title, rating, yes) in [("Steady partnership", 4, true), ("Rough patch", 2, false)] {
        println!("\n== {title} ==");
        let mut session = AssessmentSession::new(ScoreEngine::clone(&engine));

        let mut criteria = engine.catalog().list().iter();
        if let Some(first) = criteria.next() {
            record_canned(&mut session, &first.key, first.kind, rating, yes)?;
        }
        if let Err(violation) = session.request_result() {
            println!(
                "Result withheld: {} criteria still unanswered",
                violation.missing.len()
            );
        }

        for criterion in criteria {
            record_canned(&mut session, &criterion.key, criterion.kind, rating, yes)?;
        }
        println!("Session state: {}", session.state().label());

        let assessment = session.request_result()?.clone();
        render_assessment(engine.catalog(), &assessment);
        session.dismiss();
    }

    Ok(())
}

fn record_canned(
    session: &mut AssessmentSession,
    key: &str,
    kind: CriterionKind,
    rating: i32,
    yes: bool,
) -> Result<(), AppError> {
    let answer = match kind {
        CriterionKind::Rating => Answer::Rating(rating),
        CriterionKind::Boolean => Answer::Boolean(yes),
    };
    session.record(key, answer)?;
    Ok(())
}

fn missing_prompt(catalog: &CriteriaCatalog, missing: &[String]) -> String {
    let mut prompt = String::from("Please answer every criterion before viewing the result.\n");
    for key in missing {
        let label = catalog
            .get(key)
            .map_or(key.as_str(), |criterion| criterion.label.as_str());
        prompt.push_str(&format!("- {label} [{key}]\n"));
    }
    prompt
}

fn render_catalog(catalog: &CriteriaCatalog) {
    println!("Catalog: {}", catalog.name());
    println!("\nCriteria");
    for (position, criterion) in catalog.list().iter().enumerate() {
        let contribution = if criterion.is_bonus() {
            format!("+{:.1} when yes", criterion.weight)
        } else {
            format!("weight {:.1}", criterion.weight)
        };
        println!(
            "{}. {} [{}] {}, {}",
            position + 1,
            criterion.label,
            criterion.key,
            criterion.kind.label(),
            contribution
        );
        if !criterion.description.is_empty() {
            println!("   {}", criterion.description);
        }
    }

    let scale = catalog.scale();
    println!("\nRating scale {}-{}", scale.min, scale.max);
    for value in scale.values() {
        if let Some(caption) = scale.caption(value) {
            println!("- {value}: {caption}");
        }
    }

    println!("\nBands");
    for threshold in catalog.ladder().steps() {
        println!(
            "- from {:.1}: {} ({})",
            threshold.from, threshold.band, threshold.description
        );
    }
}

fn render_assessment(catalog: &CriteriaCatalog, assessment: &Assessment) {
    if !assessment.complete {
        println!(
            "Preview only: {}/{} criteria answered",
            assessment.answered, assessment.total
        );
    }
    println!("Score: {:.2}/5", assessment.display_score);
    println!("Band: {} ({})", assessment.band, assessment.interpretation);

    println!("\nBreakdown");
    for component in &assessment.components {
        let label = catalog
            .get(&component.key)
            .map(|criterion| criterion.label.as_str())
            .unwrap_or(component.key.as_str());
        println!(
            "- {}: {:.1} x {:.1} = {:.2}",
            label, component.value, component.weight, component.points
        );
    }
}
