use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use taiwa::prelude::*;

/// A CLI tool to generate random, valid bot scripts for the taiwa editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_script.json")]
    output: String,

    /// Number of questions in the script
    #[arg(short, long, default_value_t = 12)]
    questions: usize,

    /// Maximum number of answer choices per question
    #[arg(long, default_value_t = 3)]
    max_choices: usize,

    /// Probability that a question offers choices instead of a plain `next`
    #[arg(long, default_value_t = 0.7)]
    choice_ratio: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const GREETINGS: &[&str] = &[
    "Hi! How can I help you today?",
    "Welcome back! What are you looking for?",
    "Hello there, do you have a minute?",
];

const ANSWERS: &[&str] = &[
    "Yes", "No", "Maybe later", "Tell me more", "Pricing", "Support", "Talk to a human",
];

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.questions == 0 {
        eprintln!("Error: --questions must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.choice_ratio) {
        eprintln!(
            "Error: --choice-ratio ({}) must be between 0 and 1",
            cli.choice_ratio
        );
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    println!(
        "Generating a script with {} questions (up to {} choices each)...",
        cli.questions, cli.max_choices
    );
    let script = generate_script(&mut rng, cli.questions, cli.max_choices, cli.choice_ratio);

    // Round-trip through the importer so only loadable scripts are written.
    let graph = import_script(&script)?;
    println!(
        "-> Script imports cleanly: {} nodes, {} edges.",
        graph.nodes().len(),
        graph.edges().len()
    );

    fs::write(&cli.output, script.to_json_pretty()?)?;
    println!("Successfully generated and saved script to '{}'", cli.output);
    Ok(())
}

/// Builds a script whose pointers only go forward, so the graph is always acyclic.
fn generate_script<R: Rng>(
    rng: &mut R,
    count: usize,
    max_choices: usize,
    choice_ratio: f64,
) -> ScriptConfig {
    let names: Vec<String> = (1..=count).map(|i| format!("q{}", i)).collect();

    let nodes = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let later = &names[i + 1..];
            let question = if i == 0 {
                GREETINGS[rng.random_range(0..GREETINGS.len())].to_string()
            } else {
                format!("Question number {}?", i + 1)
            };
            let mut record = QuestionRecord {
                name: name.clone(),
                question,
                response: rng.random_bool(0.3).then(|| "Got it.".to_string()),
                choices: Vec::new(),
                next: None,
                only_choices: false,
            };

            if max_choices > 0 && rng.random_bool(choice_ratio) {
                let n = rng.random_range(1..=max_choices);
                record.only_choices = rng.random_bool(0.8);
                record.choices = (0..n)
                    .map(|_| ChoiceRecord {
                        text: ANSWERS[rng.random_range(0..ANSWERS.len())].to_string(),
                        response: None,
                        next: pick(rng, later),
                        request_contact: rng.random_bool(0.1),
                    })
                    .collect();
            } else {
                record.next = pick(rng, later);
            }
            record
        })
        .collect();

    ScriptConfig {
        first_node_name: names[0].clone(),
        nodes,
    }
}

/// Picks a later question most of the time, otherwise ends the branch.
fn pick<R: Rng>(rng: &mut R, later: &[String]) -> Option<String> {
    if later.is_empty() || rng.random_bool(0.2) {
        None
    } else {
        Some(later[rng.random_range(0..later.len())].clone())
    }
}
