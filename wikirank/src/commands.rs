use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("wikirank")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wikirank")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Log every crawl decision (overridden by RUST_LOG)")
                .required(false),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Breadth-first crawl from a seed article, keeping only pages that mention \
                every keyword. Writes the link graph as an edge list.",
                )
                .arg(
                    arg!(-s --"seed" <PAGE>)
                        .required(true)
                        .help("Seed article: a title, a /wiki/ path or a full article URL"),
                )
                .arg(
                    arg!(-k --"keywords" <KEYWORD>)
                        .required(true)
                        .num_args(1..)
                        .help(
                            "Keywords every admitted page must contain. Separate with commas \
                        or repeat the value; quote a phrase to match it whole.",
                        ),
                )
                .arg(
                    arg!(-m --"max-pages" <NUM>)
                        .required(false)
                        .help("The most pages to admit into the graph")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the edge list")
                        .default_value("graph.txt"),
                )
                .arg(
                    arg!(--"base-url" <URL>)
                        .required(false)
                        .help("Wiki to crawl")
                        .default_value("https://en.wikipedia.org"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                ),
        )
        .subcommand(
            command!("rank")
                .about("Rank the pages of a stored edge list by PageRank, in-degree and out-degree")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("Edge list produced by `crawl`")
                        .default_value("graph.txt"),
                )
                .arg(
                    arg!(-e --"eps" <EPSILON>)
                        .required(false)
                        .help("Convergence threshold for the power iteration")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("0.0001"),
                )
                .arg(
                    arg!(-n --"top" <NUM>)
                        .required(false)
                        .help("How many pages to list per metric")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(["text", "json", "csv", "markdown"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                ),
        )
}
