use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use tariff_scout::{
    aggregate::{BucketRecord, ConsumptionSummary},
    flow::{EnergyFlow, SourceSummary},
    quantities::cost::Cost,
    realtime::RealtimeReport,
    tariff::{BestAlternative, CostResult},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn savings_color(savings: Cost) -> Color {
    if savings > Cost::ZERO { Color::Green } else { Color::Red }
}

pub fn build_summary_table(summary: &ConsumptionSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Start", "End", "Samples", "Energy", "Average", "Max", "Min", "Cost"]);
    table.add_row(vec![
        Cell::new(summary.start.format("%Y-%m-%d %H:%M")),
        Cell::new(summary.end.format("%Y-%m-%d %H:%M")),
        Cell::new(summary.n_samples).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        Cell::new(summary.total).set_alignment(CellAlignment::Right),
        Cell::new(summary.power.mean).set_alignment(CellAlignment::Right),
        Cell::new(summary.power.max).set_alignment(CellAlignment::Right).fg(Color::Red),
        Cell::new(summary.power.min).set_alignment(CellAlignment::Right).fg(Color::Green),
        Cell::new(summary.reference_cost).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_costs_table(costs: &CostResult, best: &BestAlternative) -> Table {
    let reference_cost = costs.reference_cost().unwrap_or(Cost::ZERO);
    let mut table = new_table();
    table.set_header(vec!["Tariff", "Cost", "Savings", "Savings %"]);
    for (name, cost) in costs.iter() {
        let is_reference = name == costs.reference_name();
        let is_best = best.provider.as_deref() == Some(name);
        let savings = reference_cost - cost;
        let mut name_cell = Cell::new(name);
        if is_reference {
            name_cell = name_cell.add_attribute(Attribute::Italic);
        }
        if is_best {
            name_cell = name_cell.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            name_cell,
            Cell::new(cost).set_alignment(CellAlignment::Right),
            if is_reference {
                Cell::new("")
            } else {
                Cell::new(savings).set_alignment(CellAlignment::Right).fg(savings_color(savings))
            },
            if is_reference {
                Cell::new("")
            } else {
                Cell::new(format!("{:.1}%", savings.percent_of(reference_cost)))
                    .set_alignment(CellAlignment::Right)
                    .fg(savings_color(savings))
            },
        ]);
    }
    table
}

pub fn build_buckets_table(
    label: &str,
    buckets: impl IntoIterator<Item = (String, BucketRecord)>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![label, "Samples", "Energy", "Average", "Max", "Min", "Cost"]);
    for (bucket, record) in buckets {
        table.add_row(vec![
            Cell::new(bucket),
            Cell::new(record.n_samples).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(record.total).set_alignment(CellAlignment::Right),
            Cell::new(record.average).set_alignment(CellAlignment::Right),
            Cell::new(record.max).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(record.min).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(record.cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_realtime_table(report: &RealtimeReport) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Horizon", "Power", "Energy", "Rate", "Min rate", "Max rate", "Current", "Candidate",
        "Savings", "Savings %",
    ]);
    for horizon in report.horizons() {
        table.add_row(vec![
            Cell::new(horizon.horizon),
            Cell::new(horizon.consumption.mean).set_alignment(CellAlignment::Right),
            Cell::new(horizon.energy).set_alignment(CellAlignment::Right),
            Cell::new(horizon.rates.mean).set_alignment(CellAlignment::Right),
            Cell::new(horizon.rates.min).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(horizon.rates.max).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(horizon.reference_cost).set_alignment(CellAlignment::Right),
            Cell::new(horizon.candidate_cost).set_alignment(CellAlignment::Right),
            Cell::new(horizon.savings)
                .set_alignment(CellAlignment::Right)
                .fg(savings_color(horizon.savings)),
            Cell::new(format!("{:.1}%", horizon.savings_percent))
                .set_alignment(CellAlignment::Right)
                .fg(savings_color(horizon.savings)),
        ]);
    }
    table
}

pub fn build_flow_table(flow: &EnergyFlow) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Source", "Latest", "Average", "Samples"]);
    for (name, source) in [
        ("House", flow.house),
        ("Solar", flow.solar),
        ("Battery", flow.battery),
        ("Grid", flow.grid),
    ] {
        let Some(SourceSummary { latest, average, n_samples }) = source else {
            table.add_row(vec![Cell::new(name).add_attribute(Attribute::Dim), Cell::new("n/a")]);
            continue;
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(latest).set_alignment(CellAlignment::Right),
            Cell::new(average).set_alignment(CellAlignment::Right),
            Cell::new(n_samples).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        ]);
    }
    if let Some(self_consumption) = flow.self_consumption {
        table.add_row(vec![
            Cell::new("Self-consumption"),
            Cell::new(format!("{:.0}%", self_consumption * 100.0))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
        ]);
    }
    table
}
