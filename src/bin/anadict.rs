extern crate clap;

use std::io::{self, BufRead};
use std::process::exit;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;

use anadict::*;

pub fn common_arguments<'a, 'b>() -> Vec<clap::Arg<'a, 'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push(
        Arg::with_name("lexicon")
            .long("lexicon")
            .short("l")
            .help("Lexicon to index before answering queries. A newline-delimited word list; only the first tab-separated column of each line is read. This option may be used multiple times for multiple lexicons.")
            .takes_value(true)
            .number_of_values(1)
            .multiple(true)
            .required(true),
    );
    args.push(
        Arg::with_name("json")
            .long("json")
            .short("j")
            .help("Output json instead of tsv")
            .required(false),
    );
    args
}

fn load_index(matches: &ArgMatches) -> AnagramIndex {
    let index = AnagramIndex::new();
    if let Some(filenames) = matches.values_of("lexicon") {
        for filename in filenames {
            match index.read_lexicon(filename) {
                Ok(count) => info!("read {} words from {}", count, filename),
                Err(err) => {
                    eprintln!("Error reading lexicon {}: {}", filename, err);
                    exit(2);
                }
            }
        }
    }
    index
}

///Answer one query word per input line: the word followed by its anagrams
fn process(index: &AnagramIndex, inputstream: impl BufRead, limit: Option<usize>, include_proper_nouns: bool, json: bool) {
    for line in inputstream.lines() {
        if let Ok(input) = line {
            if input.is_empty() {
                continue;
            }
            let word = Word::new(&input);
            let anagrams = index.find(&word, limit, include_proper_nouns);
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "word": input, "anagrams": anagrams })
                );
            } else {
                print!("{}", input);
                for anagram in anagrams {
                    print!("\t{}", anagram);
                }
                println!();
            }
        }
    }
}

fn main() {
    env_logger::init();

    let matches = App::new("anadict")
        .version(env!("CARGO_PKG_VERSION"))
        .about("In-memory anagram dictionary: look up anagram classes, test anagram sets and report aggregate lexicon statistics")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("query")
                .about("Read one query word per line from standard input and print the anagrams of each")
                .args(&common_arguments())
                .arg(
                    Arg::with_name("limit")
                        .long("limit")
                        .short("n")
                        .help("Maximum number of anagrams to return per query word (unlimited if not set)")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("no-proper-nouns")
                        .long("no-proper-nouns")
                        .help("Filter words classified as proper nouns out of the results")
                        .required(false),
                ),
        )
        .subcommand(
            SubCommand::with_name("test")
                .about("Test whether the given words are all anagrams of each other; the exit code mirrors the answer")
                .arg(
                    Arg::with_name("words")
                        .help("The words to test")
                        .multiple(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("stats")
                .about("Print aggregate statistics over the indexed lexicon")
                .args(&common_arguments()),
        )
        .subcommand(
            SubCommand::with_name("groups")
                .about("Query anagram classes by size")
                .args(&common_arguments())
                .arg(
                    Arg::with_name("size")
                        .long("size")
                        .short("s")
                        .help("Print every class with exactly this many members")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("largest")
                        .long("largest")
                        .help("Print the largest class")
                        .required(false),
                )
                .arg(
                    Arg::with_name("smallest")
                        .long("smallest")
                        .help("Print the smallest class")
                        .required(false),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("query", Some(submatches)) => {
            let index = load_index(submatches);
            let limit = submatches.value_of("limit").map(|value| {
                value.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("--limit must be an integer");
                    exit(2);
                })
            });
            process(
                &index,
                io::stdin().lock(),
                limit,
                !submatches.is_present("no-proper-nouns"),
                submatches.is_present("json"),
            );
        }
        ("test", Some(submatches)) => {
            let words: Vec<&str> = submatches
                .values_of("words")
                .expect("words are required")
                .collect();
            let result = AnagramIndex::are_anagrams(&words);
            println!("{}", result);
            exit(if result { 0 } else { 1 });
        }
        ("stats", Some(submatches)) => {
            let index = load_index(submatches);
            let stats = index.stats();
            if submatches.is_present("json") {
                println!(
                    "{}",
                    serde_json::to_string(&stats).expect("stats serialize to json")
                );
            } else {
                println!("count\t{}", stats.count);
                println!("min\t{}", stats.min);
                println!("max\t{}", stats.max);
                println!("median\t{}", stats.median);
                println!("average\t{}", stats.average);
            }
        }
        ("groups", Some(submatches)) => {
            let index = load_index(submatches);
            let groups: Vec<WordGroup> = if submatches.is_present("size") {
                //an unparseable size yields the empty result, not an error
                match submatches
                    .value_of("size")
                    .expect("size has a value")
                    .parse::<usize>()
                {
                    Ok(size) => index.groups_with_size(size),
                    Err(_) => Vec::new(),
                }
            } else if submatches.is_present("largest") {
                let group = index.largest_group();
                if group.is_empty() {
                    Vec::new()
                } else {
                    vec![group]
                }
            } else if submatches.is_present("smallest") {
                let group = index.smallest_group();
                if group.is_empty() {
                    Vec::new()
                } else {
                    vec![group]
                }
            } else {
                eprintln!("Specify one of --size, --largest or --smallest");
                exit(2);
            };
            if submatches.is_present("json") {
                println!("{}", serde_json::json!({ "anagram_groups": groups }));
            } else {
                for group in groups {
                    println!("{}", group.join("\t"));
                }
            }
        }
        _ => {
            eprintln!("No such subcommand, see --help for usage");
            exit(2);
        }
    }
}
