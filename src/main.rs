//! # greetpack CLI
//!
//! Command-line interface for greetpack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use greetpack::GreetpackError;
use greetpack::calendar::DateGrouper;
use greetpack::cli::Args;
use greetpack::output::write_json;
use greetpack::parser::GreetingParser;

fn main() {
    let args = <Args as ClapParser>::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), GreetpackError> {
    let total_start = Instant::now();
    let output_path = args.output_path();
    let config = args.parser_config()?;

    if !args.quiet {
        println!("☀️  greetpack v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:   {}", args.input.display());
        println!("💾 Output:  {}", output_path.display());
        println!(
            "👤 Senders: {} → {}, phone numbers → {}",
            config.senders.owner_label, config.senders.owner_tag, config.senders.counterpart_tag
        );
        println!();
        println!("⏳ Parsing export...");
    }

    // Step 1: Parse
    let parser = GreetingParser::with_config(config)?;
    let parse_start = Instant::now();
    let records = parser.parse_file(&args.input)?;
    let parse_time = parse_start.elapsed();

    if !args.quiet {
        println!(
            "   Found {} \"good morning\" messages ({:.2}s)",
            records.len(),
            parse_time.as_secs_f64()
        );
    }

    // Step 2: Group by day
    let mut doc = DateGrouper::new().group(records, args.source_file());
    if args.numbered {
        doc = doc.with_day_numbers();
    }

    // Step 3: Write
    write_json(&doc, &output_path)?;

    if args.quiet {
        return Ok(());
    }

    let summary = doc.summary();
    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    println!();
    println!("📊 Summary:");
    println!("   Source file:  {}", args.input.display());
    println!("   Output file:  {}", output_path.display());
    println!("   Greetings:    {}", summary.total_messages);
    println!("   Date range:   {}", summary.range_label());
    println!("   Dates:        {}", summary.date_count);
    println!(
        "   Total time:   {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}
