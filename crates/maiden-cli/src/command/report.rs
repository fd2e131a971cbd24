use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context;
use maiden_analysis::profile::{
    CountEntry, DatasetProfile, FareGroupEntry, NumericSummary, RateEntry,
};
use maiden_records::RecordSet;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Path to the passenger CSV file
    #[arg(long, default_value = "data/titanic.csv")]
    data: PathBuf,
    /// Print the profile as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let records = RecordSet::from_csv_path(&arg.data)
        .with_context(|| format!("Failed to load dataset from {}", arg.data.display()))?;
    let profile = DatasetProfile::build(&records).context("Failed to build dataset profile")?;

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }
    print!("{}", render(&profile));
    Ok(())
}

fn push_rates(out: &mut String, label: &str, entries: &[RateEntry]) {
    let _ = writeln!(out, "{label}:");
    for entry in entries {
        let _ = writeln!(out, "  {}: {:.1}%", entry.group, entry.rate_percent);
    }
}

fn push_counts(out: &mut String, label: &str, entries: &[CountEntry]) {
    let _ = writeln!(out, "{label}:");
    for entry in entries {
        let _ = writeln!(out, "  {}: {} ({:.1}%)", entry.group, entry.count, entry.percent);
    }
}

fn push_summary(out: &mut String, label: &str, summary: &NumericSummary) {
    let _ = writeln!(
        out,
        "{label}: mean {:.2}, median {:.2}, min {:.2}, max {:.2}, std {:.2}",
        summary.mean, summary.median, summary.min, summary.max, summary.std_dev,
    );
}

fn push_fare_groups(out: &mut String, label: &str, entries: &[FareGroupEntry]) {
    let _ = writeln!(out, "{label}:");
    for entry in entries {
        let _ = writeln!(
            out,
            "  {}: mean {:.2}, median {:.2}, min {:.2}, max {:.2}",
            entry.group, entry.stats.mean, entry.stats.median, entry.stats.min, entry.stats.max,
        );
    }
}

fn render(profile: &DatasetProfile) -> String {
    let mut out = String::new();

    out.push_str("# Titanic Dataset Report\n\n## Survival\n\n");
    let _ = writeln!(out, "overall: {:.1}%", profile.survival.overall_percent);
    push_rates(&mut out, "by class", &profile.survival.by_class);
    push_rates(&mut out, "by sex", &profile.survival.by_sex);
    push_rates(&mut out, "by age group", &profile.survival.by_age_group);
    push_rates(&mut out, "by port", &profile.survival.by_port);
    push_rates(&mut out, "by family size", &profile.survival.by_family_size);

    out.push_str("\n## Demographics\n\n");
    let _ = writeln!(out, "passengers: {}", profile.demographics.total_passengers);
    push_counts(&mut out, "classes", &profile.demographics.classes);
    push_counts(&mut out, "genders", &profile.demographics.genders);
    push_summary(&mut out, "ages", &profile.demographics.ages);
    push_counts(&mut out, "age groups", &profile.demographics.age_groups);
    push_counts(&mut out, "ports", &profile.demographics.ports);
    push_summary(&mut out, "relatives aboard", &profile.demographics.family_sizes);

    out.push_str("\n## Fares\n\n");
    push_summary(&mut out, "overall", &profile.fares.overall);
    push_fare_groups(&mut out, "by class", &profile.fares.by_class);
    push_fare_groups(&mut out, "by survival", &profile.fares.by_survival);
    push_fare_groups(&mut out, "by port", &profile.fares.by_port);

    out.push_str("\n## Correlations\n\n");
    out.push_str("with survival:\n");
    for entry in &profile.correlations.with_survival {
        let _ = writeln!(out, "  {}: {:+.3}", entry.field, entry.coefficient);
    }
    out.push_str("strongest pairs:\n");
    for pair in &profile.correlations.strongest_pairs {
        let _ = writeln!(
            out,
            "  {} / {}: {:+.3}",
            pair.first, pair.second, pair.coefficient
        );
    }

    out.push_str("\n## Hypothesis tests\n\n");
    let t_test = |name: &str, test: Option<maiden_analysis::profile::TTestEntry>| match test {
        Some(test) => format!(
            "{name}: t = {:.3}, df = {:.1}, significant: {}\n",
            test.statistic,
            test.degrees_of_freedom,
            if test.significant { "yes" } else { "no" },
        ),
        None => format!("{name}: not defined for this dataset\n"),
    };
    out.push_str(&t_test("age vs survival (Welch t)", profile.tests.age_ttest));
    out.push_str(&t_test("fare vs survival (Welch t)", profile.tests.fare_ttest));
    let chi = |name: &str, test: Option<maiden_analysis::profile::ChiSquaredEntry>| match test {
        Some(test) => format!(
            "{name}: chi2 = {:.3}, df = {}, significant: {}\n",
            test.statistic,
            test.degrees_of_freedom,
            if test.significant { "yes" } else { "no" },
        ),
        None => format!("{name}: not defined for this dataset\n"),
    };
    out.push_str(&chi("class vs survival", profile.tests.class_chi_squared));
    out.push_str(&chi("sex vs survival", profile.tests.sex_chi_squared));
    out.push_str(&chi("port vs survival", profile.tests.port_chi_squared));

    out
}
