//! # tgroom CLI
//!
//! Command-line interface for the tgroom library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use tgroom::cli::{Args, init_logging};
use tgroom::core::{OutputConfig, RoomStats};
use tgroom::format::{OutputFormat, write_to_format};
use tgroom::message::MessageType;
use tgroom::{RoomParser, TgroomError};

const DEFAULT_OUTPUT_STEM: &str = "room";

fn main() {
    let args = <Args as ClapParser>::parse();
    if let Err(e) = init_logging(args.log_level) {
        eprintln!("⚠️ Warning: Could not initialize logging: {e}");
    }

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), TgroomError> {
    let total_start = Instant::now();
    let lib_format: OutputFormat = args.format.into();
    let output_path = adjust_output_extension(&args.output, lib_format);

    // Print header
    println!("📦 tgroom v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", lib_format);
    println!("🕒 Zone:    {}", args.time_zone);
    println!();

    // Step 1: Parse
    let parser = RoomParser::with_config(args.parse_config());
    println!("⏳ Parsing export...");
    let parse_start = Instant::now();
    let mut room = parser.parse(&args.input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        room.len(),
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Sort (optional)
    if args.sort {
        println!("🔀 Sorting by send time...");
        room.sort_chronological();
    }

    // Step 3: Write
    let mut output_config = OutputConfig::all();
    if args.no_media {
        output_config = output_config.without_media();
    }

    println!("💾 Writing {}...", lib_format);
    let write_start = Instant::now();
    write_to_format(&room, &output_path, lib_format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    // Summary
    let stats = RoomStats::from_room(&room);
    println!();
    println!("📊 Summary:");
    if !room.room_name.is_empty() {
        println!("   Room:      {}", room.room_name);
    }
    println!("   Messages:  {}", stats.total);
    println!("   Senders:   {}", stats.senders);
    println!("   Replies:   {}", stats.replies);
    println!("   Media:     {} ({:.1}%)", stats.media(), stats.media_ratio());
    for ty in MessageType::all() {
        let count = stats.count(*ty);
        if count > 0 {
            println!("   {:<10} {}", format!("{ty}:"), count);
        }
    }

    // Performance stats
    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = stats.total as f64 / total_time.as_secs_f64().max(f64::EPSILON);
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

/// Adjusts output file extension based on format if using default output.
fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != format!("{DEFAULT_OUTPUT_STEM}.json") {
        return output.to_string();
    }
    format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension())
}
