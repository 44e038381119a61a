use clap::Parser;
use truck_load::catalog::{self, CATALOG, LoadLine, LoadRequest};
use truck_load::packer::ShelfPacker;

#[derive(Parser)]
#[command(
    name = "truck_load",
    about = "Check whether a set of containers fits on a truck bed"
)]
struct Cli {
    /// Truck bed dimensions in cm (LxW)
    #[arg(long, default_value = "600x235")]
    truck: String,

    /// Items as NAME:qty or LxW:qty (e.g. Frame:2 "Row (15kg):4" 120x80:1)
    #[arg(long = "item", num_args = 1..)]
    items: Vec<String>,

    /// List the item catalog and exit
    #[arg(long)]
    list: bool,

    /// Log packing decisions to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if cli.list {
        for entry in &CATALOG {
            println!("{:<12} {}", entry.name, entry.rect);
        }
        return;
    }

    let truck = catalog::parse_dimensions(&cli.truck).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let lines: Vec<LoadLine> = cli
        .items
        .iter()
        .map(|s| LoadLine::parse(s))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let request = LoadRequest::new(truck, lines)
        .into_packing_request()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let report = ShelfPacker::new(request.bound).run(&request.items);

    println!("{}", catalog::message(report.fits));
    println!(
        "Summary: {} of {} item{} loaded in {} row{} on a {} truck",
        report.placed,
        report.total,
        if report.total == 1 { "" } else { "s" },
        report.row_count(),
        if report.row_count() == 1 { "" } else { "s" },
        request.bound,
    );

    if !report.fits {
        std::process::exit(2);
    }
}
