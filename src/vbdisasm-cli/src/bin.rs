/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use clap::{Parser, Subcommand};
use std::{
    fs,
    path::{Path, PathBuf},
};
use vbdisasm::{
    config::{ScanFlags, ScanSettings},
    disassembly::{Disassembly, DisassemblyDisplaySettings},
    reader::RomReader,
    report::{build_report, ScanSummary},
    scanner::{scan_vip_writes, ScanHit},
};

mod load_rom_error;
mod rom_search;
mod utils;

use load_rom_error::LoadRomError;

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Default, clap::ValueEnum)]
pub enum ArgFocus {
    /// Every write into the VIP segment
    #[default]
    All,
    /// Only OAM, World table and OBJ/BG related registers
    ObjBg,
}

/// vb-disasm: V810 disassembler and VIP write scanner for Virtual Boy ROMs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble a ROM from a start PC
    Disasm(DisasmArgs),
    /// Scan for VIP related memory writes
    ScanVip(ScanVipArgs),
    /// Build a markdown report from `scan-vip` outputs
    Report(ReportArgs),
}

#[derive(clap::Args, Debug)]
struct DisasmArgs {
    /// Path to a .vb ROM
    rom: PathBuf,

    /// Start PC (hex/dec) or `reset`
    #[arg(long, default_value = "reset", value_parser = utils::parse_start)]
    start: u32,

    /// Number of instructions to decode
    #[arg(long, default_value_t = 512)]
    count: usize,

    /// ROM base address
    #[arg(long, default_value = "0x07000000", value_parser = utils::parse_int)]
    base: u32,

    /// Disable label generation
    #[arg(long)]
    no_labels: bool,

    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct ScanVipArgs {
    /// ROM file, or directory searched recursively for .vb ROM files
    target: PathBuf,

    /// Start PC for the linear decode (hex/dec) or `reset`
    #[arg(long, default_value = "reset", value_parser = utils::parse_start)]
    start: u32,

    /// ROM base address
    #[arg(long, default_value = "0x07000000", value_parser = utils::parse_int)]
    base: u32,

    /// Include writes whose base register value is unknown
    #[arg(long)]
    include_unknown: bool,

    #[arg(long, value_enum, default_value_t = ArgFocus::All)]
    focus: ArgFocus,

    /// Max result lines per ROM (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Number of instructions to decode per ROM. Defaults to one per halfword of the ROM
    #[arg(long)]
    count: Option<usize>,

    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct ReportArgs {
    /// ROM directory the scans were made on
    #[arg(long)]
    target_dir: String,

    /// `scan-vip` output made with `--focus all`
    #[arg(long)]
    scan_all: PathBuf,

    /// `scan-vip` output made with `--focus obj-bg`
    #[arg(long)]
    scan_objbg: PathBuf,

    /// Output markdown path
    #[arg(long)]
    output: PathBuf,
}

impl ScanVipArgs {
    fn settings(&self) -> ScanSettings {
        let mut flags = ScanFlags::empty();
        if self.include_unknown {
            flags |= ScanFlags::IncludeUnknown;
        }
        if self.focus == ArgFocus::ObjBg {
            flags |= ScanFlags::FocusObjBg;
        }

        ScanSettings::new()
            .with_flags(flags)
            .with_instruction_count(self.count)
    }
}

fn run_disasm(args: &DisasmArgs) -> String {
    let data = utils::pretty_unwrap(fs::read(&args.rom));
    let reader = utils::pretty_unwrap(RomReader::new(&data, args.base));

    let start = utils::get_time_now();
    let disassembly = Disassembly::new(reader.disassemble_range(args.start, args.count));
    let end = utils::get_time_now();
    log::debug!("Disassembled {:?}: {:?}", args.rom, end - start);

    let settings = DisassemblyDisplaySettings::new().with_with_labels(!args.no_labels);

    format_disasm(args, &disassembly, &settings)
}

/// The `ROM:`, `Base:`, `Start PC:` and `Count:` header lines followed directly by the listing.
fn format_disasm(
    args: &DisasmArgs,
    disassembly: &Disassembly,
    settings: &DisassemblyDisplaySettings,
) -> String {
    format!(
        "ROM: {}\nBase: 0x{:08X}\nStart PC: 0x{:08X}\nCount: {}\n{}",
        args.rom.display(),
        args.base,
        args.start,
        args.count,
        disassembly.display(settings)
    )
}

fn scan_rom(
    path: &Path,
    base: u32,
    start_pc: u32,
    settings: &ScanSettings,
) -> Result<Vec<ScanHit>, LoadRomError> {
    let data = fs::read(path)?;
    let reader = RomReader::new(&data, base)?;

    let start = utils::get_time_now();
    let hits = scan_vip_writes(&reader, start_pc, settings);
    let end = utils::get_time_now();
    log::debug!("Scanned {:?}: {} hits in {:?}", path, hits.len(), end - start);

    Ok(hits)
}

/// Lays out the per ROM results of a scan, one `== path ==` section each.
fn format_scan_results(
    results: &[(PathBuf, Result<Vec<ScanHit>, LoadRomError>)],
    limit: usize,
) -> String {
    let mut lines = Vec::new();

    for (path, result) in results {
        lines.push(format!("== {} ==", path.display()));

        match result {
            Ok(hits) if hits.is_empty() => {
                lines.push("(no VIP write candidates found)".to_string())
            }
            Ok(hits) => {
                let shown = if limit > 0 {
                    limit.min(hits.len())
                } else {
                    hits.len()
                };
                lines.extend(hits[..shown].iter().map(ToString::to_string));
            }
            Err(e) => lines.push(format!("(error: {})", e)),
        }
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

fn run_scan_vip(args: &ScanVipArgs) -> String {
    let roms = rom_search::find_roms(&args.target);
    if roms.is_empty() {
        return format!("No .vb files found under: {}", args.target.display());
    }

    let settings = args.settings();
    let results: Vec<_> = roms
        .into_iter()
        .map(|path| {
            let result = scan_rom(&path, args.base, args.start, &settings);
            if let Err(e) = &result {
                log::error!("Failed to scan {:?}: {}", path, e);
            }
            (path, result)
        })
        .collect();

    format_scan_results(&results, args.limit)
}

fn run_report(args: &ReportArgs) -> String {
    let all_text = utils::pretty_unwrap(fs::read_to_string(&args.scan_all));
    let obj_bg_text = utils::pretty_unwrap(fs::read_to_string(&args.scan_objbg));

    let all = ScanSummary::parse(&args.scan_all.display().to_string(), &all_text);
    let obj_bg = ScanSummary::parse(&args.scan_objbg.display().to_string(), &obj_bg_text);

    let generated = format!("unix {}", utils::get_time_now().as_secs());

    build_report(&all, &obj_bg, &args.target_dir, &generated)
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let (out, output) = match &args.command {
        Command::Disasm(args) => (run_disasm(args), args.output.as_deref()),
        Command::ScanVip(args) => (run_scan_vip(args), args.output.as_deref()),
        Command::Report(args) => (run_report(args), Some(args.output.as_path())),
    };

    if let Some(output) = output {
        utils::pretty_unwrap(utils::write_output(output, &out));
        println!("Wrote: {}", output.display());
    } else {
        println!("{}", out);
    }
}
