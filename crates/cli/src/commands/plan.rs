use anyhow::{Context, Result};
use beanforge_core::{BeanDefinitionPlan, BeanStrategy, ClassPlanOutcome, Planner};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::display::formatter::print_plan;
use crate::utils::model::{load_config, load_model};

#[derive(Serialize)]
struct ClassReport<'a> {
    class: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<&'a BeanStrategy>,
    plans: &'a [BeanDefinitionPlan],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a ClassPlanOutcome> for ClassReport<'a> {
    fn from(outcome: &'a ClassPlanOutcome) -> Self {
        let (strategy, error) = match &outcome.result {
            Ok((strategy, _)) => (Some(strategy), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            class: &outcome.class_name,
            strategy,
            plans: outcome.plans(),
            error,
        }
    }
}

pub fn plan_command(
    model_path: &Path,
    config_path: Option<&Path>,
    class: Option<&str>,
    json: bool,
) -> Result<()> {
    debug!("Planning model: {} (class: {:?})", model_path.display(), class);

    let config = load_config(config_path, model_path)?;
    let model = load_model(model_path)?;
    let planner = Planner::with_config(model, config).context("Failed to create planner")?;

    let outcomes = match class {
        Some(name) => vec![ClassPlanOutcome {
            class_name: name.to_string(),
            result: planner.plan_class(name),
        }],
        None => planner.plan_all(),
    };

    if json {
        let reports: Vec<ClassReport> = outcomes.iter().map(ClassReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_outcomes(&outcomes);
    }

    let failures = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failures > 0 {
        anyhow::bail!("{failures} classes failed to plan");
    }
    Ok(())
}

fn print_outcomes(outcomes: &[ClassPlanOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok((strategy, _)) if strategy.is_empty() => continue,
            Ok((strategy, plans)) => {
                println!("\n🫘 {} ({strategy})", outcome.class_name);
                println!("{}", "=".repeat(80));
                for plan in plans {
                    print_plan(plan);
                }
            }
            Err(e) => {
                println!("\n❌ {}: {e}", outcome.class_name);
            }
        }
    }
}
