pub mod prompt;

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::assessment::types::{Connection, EquipmentKind};
use crate::assessment::{
    calculate_hearing_percentages, calculate_overall_assessment, calculate_overall_percentage,
    calculate_theoretical_score, generate_hearing_tips, generate_recommendations,
    questionnaire::QUESTIONS, Assessment, BandPolicy, EquipmentSetup, HearingTestResult,
};
use crate::audio::tone::{Ear, ToneSynth};
use crate::config::AppConfig;
use crate::report;
use crate::tui;
use crate::tui::screens::sweep;

/// Run the guided hearing screening.
///
/// Strictly linear wizard: equipment check → questionnaire → left-ear
/// sweep → right-ear sweep → results. No backward transitions; the retake
/// prompt at the end restarts the whole flow with fresh state.
pub fn run_hearing_test(config: &AppConfig, output: Option<&Path>, json: bool) -> Result<()> {
    loop {
        let retake = run_once(config, output, json)?;
        if !retake {
            return Ok(());
        }
        println!();
    }
}

/// One complete pass through the wizard. Returns true when the user asked
/// for a retake.
fn run_once(config: &AppConfig, output: Option<&Path>, json: bool) -> Result<bool> {
    println!();
    println!("{}", style("=== Hearing Screening ===").bold());
    println!();
    println!("  A self-administered screening, not a medical diagnosis.");
    println!("  You will need headphones or earbuds and a quiet room.");
    println!();

    // --- Step 1: Equipment check ---
    println!("{} {}", style("Step 1/4:").bold(), "Equipment");
    println!();
    let equipment = collect_equipment()?;

    if equipment.kind == EquipmentKind::Speakers {
        println!();
        println!(
            "  {} Speakers cannot isolate one ear; results will be unreliable.",
            style("WARNING").red().bold()
        );
        println!("  Use headphones or earbuds if you can.");
    }
    println!();

    // --- Step 2: Questionnaire ---
    println!("{} {}", style("Step 2/4:").bold(), "Hearing questionnaire");
    println!();
    let answers = collect_answers()?;
    let theoretical_score = calculate_theoretical_score(&answers)?;
    println!();
    println!(
        "  Self-report score: {}",
        style(format!("{theoretical_score}/100")).cyan()
    );
    println!();

    // --- Steps 3 & 4: Frequency sweeps ---
    // One synthesizer for both sweeps; the output stream is held from here
    // until results are computed.
    let synth = ToneSynth::new(&config.audio);
    if !synth.is_available() {
        println!(
            "  {} No usable audio output — the sweep will run without sound.",
            style("WARNING").red().bold()
        );
        println!();
    }

    let Some(left_ear_results) = run_sweep(&synth, Ear::Left, config, 3)? else {
        println!("  Test aborted.");
        return Ok(false);
    };
    let Some(right_ear_results) = run_sweep(&synth, Ear::Right, config, 4)? else {
        println!("  Test aborted.");
        return Ok(false);
    };
    drop(synth);

    // --- Results ---
    let policy: BandPolicy = (&config.assessment).into();
    let overall_assessment = calculate_overall_assessment(
        theoretical_score,
        &right_ear_results,
        &left_ear_results,
        &policy,
    )?;

    let result = HearingTestResult {
        theoretical_score,
        left_ear_results,
        right_ear_results,
        overall_assessment,
        recommendations: generate_recommendations(overall_assessment),
        hearing_tips: generate_hearing_tips(),
    };

    print_summary(&result)?;

    let date = chrono::Local::now().date_naive();
    let markdown = report::markdown::render(&result, &equipment, &date, &policy)?;

    let report_path = match output {
        Some(path) => path.to_path_buf(),
        None => crate::paths::report_path(&date),
    };
    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&report_path, markdown)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    println!(
        "  Report saved to {}",
        style(report_path.display()).green()
    );

    if json {
        let json_path = crate::paths::json_export_path(&date);
        if let Some(parent) = json_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&json_path, serde_json::to_string_pretty(&result)?)
            .with_context(|| format!("Failed to write JSON export: {}", json_path.display()))?;
        println!(
            "  Raw results exported to {}",
            style(json_path.display()).green()
        );
    }

    println!();
    println!("  Retake the test? [y/N]");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Equipment menu. The scoring engine never looks at this; it is echoed
/// into the report so results can be read in context.
fn collect_equipment() -> Result<EquipmentSetup> {
    println!("  What are you listening with?");
    let kinds = [
        EquipmentKind::Headphones,
        EquipmentKind::Earbuds,
        EquipmentKind::Speakers,
    ];
    let kind_labels: Vec<&str> = kinds.iter().map(|k| k.label()).collect();
    let kind = kinds[prompt::read_choice(&kind_labels)?];

    println!();
    println!("  How are they connected?");
    let connections = [Connection::Wired, Connection::Bluetooth];
    let connection_labels: Vec<&str> = connections.iter().map(|c| c.label()).collect();
    let connection = connections[prompt::read_choice(&connection_labels)?];

    Ok(EquipmentSetup { kind, connection })
}

/// Walk the fixed questionnaire, one numbered menu per question.
fn collect_answers() -> Result<Vec<usize>> {
    let mut answers = Vec::with_capacity(QUESTIONS.len());
    for (i, question) in QUESTIONS.iter().enumerate() {
        println!(
            "  {} {}",
            style(format!("Q{}/{}:", i + 1, QUESTIONS.len())).bold(),
            question.text
        );
        let answer = prompt::read_choice(&question.options)?;
        answers.push(answer);
        println!();
    }
    Ok(answers)
}

/// Console lead-in plus the TUI sweep for one ear.
fn run_sweep(
    synth: &ToneSynth,
    ear: Ear,
    config: &AppConfig,
    step: usize,
) -> Result<Option<Vec<crate::assessment::ThresholdSample>>> {
    println!(
        "{} {} ear sweep",
        style(format!("Step {step}/4:")).bold(),
        match ear {
            Ear::Left => "Left",
            Ear::Right => "Right",
        }
    );
    println!();
    println!(
        "  The tone will play only in your {} ear. If you hear nothing,",
        style(ear.label().to_uppercase()).cyan().bold()
    );
    println!("  check that earpiece before lowering the volume.");
    println!();
    println!("  Press {} to begin.", style("Enter").green().bold());
    prompt::wait_for_enter()?;

    let mut terminal = tui::init()?;
    let outcome = sweep::run(&mut terminal, synth, ear, &config.audio);
    tui::restore()?;
    let samples = outcome?;

    println!();
    Ok(samples)
}

/// Styled console summary of the final result.
fn print_summary(result: &HearingTestResult) -> Result<()> {
    let left_pct = calculate_hearing_percentages(&result.left_ear_results)?;
    let right_pct = calculate_hearing_percentages(&result.right_ear_results)?;
    let overall_pct =
        calculate_overall_percentage(&result.left_ear_results, &result.right_ear_results)?;

    println!();
    println!("{}", style("=== Results ===").bold());
    println!();
    println!(
        "  {:12} {:>6}",
        style("Overall").bold(),
        format!("{overall_pct}%")
    );
    println!(
        "  {:12} {:>6}",
        style("Left ear").bold(),
        format!("{left_pct}%")
    );
    println!(
        "  {:12} {:>6}",
        style("Right ear").bold(),
        format!("{right_pct}%")
    );
    println!();

    let band_text = result.overall_assessment.label();
    let styled_band = match result.overall_assessment {
        Assessment::Normal => style(band_text).green().bold(),
        Assessment::MildLoss => style(band_text).yellow().bold(),
        Assessment::ModerateLoss | Assessment::SevereLoss => style(band_text).red().bold(),
    };
    println!("  Assessment: {styled_band}");
    println!();

    println!("  {}", style("Recommendations").bold());
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("    {}. {rec}", i + 1);
    }
    println!();

    Ok(())
}
