//! List the gate's parameters.

use clap::Args;
use freqgate_core::{ParamScale, ParamUnit};
use freqgate_effects::GateParam;
use serde::Serialize;

#[derive(Args)]
pub struct ParamsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ParamJson {
    index: usize,
    id: u32,
    key: &'static str,
    name: &'static str,
    short_name: &'static str,
    min: f32,
    max: f32,
    default: f32,
    unit: &'static str,
    logarithmic: bool,
    labels: &'static [&'static str],
}

fn unit_name(unit: ParamUnit) -> &'static str {
    match unit {
        ParamUnit::Decibels => "dB",
        ParamUnit::Hertz => "Hz",
        ParamUnit::Milliseconds => "ms",
        ParamUnit::None => "",
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params: Vec<ParamJson> = GateParam::ALL
        .into_iter()
        .map(|param| {
            let d = param.descriptor();
            ParamJson {
                index: param.index(),
                id: d.id.0,
                key: d.string_id,
                name: d.name,
                short_name: d.short_name,
                min: d.min,
                max: d.max,
                default: d.default,
                unit: unit_name(d.unit),
                logarithmic: d.scale == ParamScale::Logarithmic,
                labels: d.labels,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    println!(
        "{:<3} {:<11} {:<18} {:>9} {:>9} {:>9}  {}",
        "#", "key", "name", "min", "max", "default", "unit"
    );
    for p in &params {
        if p.labels.is_empty() {
            println!(
                "{:<3} {:<11} {:<18} {:>9} {:>9} {:>9}  {}",
                p.index, p.key, p.name, p.min, p.max, p.default, p.unit
            );
        } else {
            let default = p.labels.get(p.default as usize).copied().unwrap_or_default();
            println!(
                "{:<3} {:<11} {:<18} {:>29}  [{}]",
                p.index,
                p.key,
                p.name,
                default,
                p.labels.join(", ")
            );
        }
    }
    Ok(())
}
