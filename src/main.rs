//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

mod commands;

use clap::ArgMatches;
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;
use std::process;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn run(name: &str, args: &ArgMatches<'_>) -> Result<String, String> {
    match name {
        "quadkey" => commands::quadkey(args),
        "utm" => commands::utm(args),
        "project" => {
            // registers [[projection]] definitions
            commands::context_from_args(args)?;
            commands::project(args)
        }
        "genconfig" => match args.value_of("config") {
            Some(_) => Ok(commands::gen_config(Some(&commands::context_from_args(args)?))),
            None => Ok(commands::gen_config(None)),
        },
        _ => {
            let ctx = commands::context_from_args(args)?;
            match name {
                "tile" => commands::tile(args, &ctx),
                "mgrs" => commands::mgrs(args, &ctx),
                _ => commands::distance(args, &ctx),
            }
        }
    }
}

fn main() {
    dotenv().ok();
    let mut app = commands::build_app(crate_version!());

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            (name, Some(sub_m)) => {
                init_logger(sub_m);
                match run(name, sub_m) {
                    Ok(output) => println!("{}", output),
                    Err(e) => {
                        error!("{}", e);
                        process::exit(1);
                    }
                }
            }
            _ => {
                let _ = app.print_help();
                println!();
            }
        },
    }
}
