use clap::{Parser, Subcommand};
use colored::Colorize;
use resub::{rune_count, Regex, RuleSet, Template};

#[derive(Parser)]
#[command(name = "resub")]
#[command(about = "resub - classify and rewrite strings through pattern/template rules")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if a pattern matches (exit code 0/1)
    Match {
        /// The pattern
        pattern: String,
        /// The input string
        input: String,
    },
    /// Execute a pattern and show the captured spans
    Exec {
        /// The pattern
        pattern: String,
        /// The input string
        input: String,
        /// Show the compiled program as well
        #[arg(short, long)]
        verbose: bool,
    },
    /// Match a pattern and expand a rewrite template
    Sub {
        /// The pattern
        pattern: String,
        /// The rewrite template (& = whole match, \1..\9 = groups)
        template: String,
        /// The input string
        input: String,
    },
    /// Apply the first matching rule from a rules file
    ///
    /// Each non-empty line of the file is `pattern<TAB>template`,
    /// highest priority first. Lines starting with '#' are skipped.
    Rewrite {
        /// Path to the rules file
        rules: String,
        /// The input string
        input: String,
    },
    /// Count the runes (code points) in a string
    Runes {
        /// The input string
        input: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match { pattern, input } => cmd_match(&pattern, &input),
        Commands::Exec {
            pattern,
            input,
            verbose,
        } => cmd_exec(&pattern, &input, verbose),
        Commands::Sub {
            pattern,
            template,
            input,
        } => cmd_sub(&pattern, &template, &input),
        Commands::Rewrite { rules, input } => cmd_rewrite(&rules, &input),
        Commands::Runes { input } => {
            println!("{}", rune_count(&input));
        }
    }
}

fn compile_or_exit(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn cmd_match(pattern: &str, input: &str) {
    let re = compile_or_exit(pattern);
    if re.is_match(input) {
        println!("{}", "true".green());
        std::process::exit(0);
    } else {
        println!("{}", "false".red());
        std::process::exit(1);
    }
}

fn cmd_exec(pattern: &str, input: &str, verbose: bool) {
    let re = compile_or_exit(pattern);

    if verbose {
        println!("{}", "Program:".bold());
        for (pc, inst) in re.program().insts().iter().enumerate() {
            println!("  {:3}  {:?}", pc, inst);
        }
        println!(
            "  anchors: start={} end={}",
            re.program().anchored_start(),
            re.program().anchored_end()
        );
        println!();
    }

    match re.exec(input) {
        Some(caps) => {
            let (start, end) = caps.span();
            println!("{}", "Match".green().bold());
            println!("  0: {}..{} = {}", start, end, input[start..end].green());
            for i in 1..=caps.group_count() {
                match caps.get(i) {
                    Some((s, e)) => {
                        println!("  {}: {}..{} = {}", i, s, e, input[s..e].green())
                    }
                    None => println!("  {}: {}", i, "(unset)".dimmed()),
                }
            }
        }
        None => println!("{}", "No match".red()),
    }
}

fn cmd_sub(pattern: &str, template: &str, input: &str) {
    let re = compile_or_exit(pattern);
    let template = Template::parse(template);

    match re.exec(input) {
        Some(caps) => match template.apply(input, &caps) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(2);
            }
        },
        None => {
            println!("{}", "No match".red());
            std::process::exit(1);
        }
    }
}

fn cmd_rewrite(rules_path: &str, input: &str) {
    let text = match std::fs::read_to_string(rules_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{} {}: {}", "Error:".red().bold(), rules_path, e);
            std::process::exit(2);
        }
    };

    let mut pairs = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('\t') {
            Some((pattern, template)) => pairs.push((pattern, template)),
            None => {
                eprintln!(
                    "{} {}:{}: expected pattern<TAB>template",
                    "Error:".red().bold(),
                    rules_path,
                    lineno + 1
                );
                std::process::exit(2);
            }
        }
    }

    let rules = match RuleSet::from_pairs(pairs) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    match rules.rewrite(input) {
        Ok(Some(hit)) => {
            println!(
                "{} {} {}",
                input.yellow(),
                format!("[rule {}]", hit.index).dimmed(),
                "->".bold()
            );
            println!("{}", hit.output.green());
        }
        Ok(None) => {
            println!("{}", "No rule matched".red());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}
