// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Demo driver: estimates the number of distinct lines in the input.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use linear_counting::lpc::LpcSketch;

/// Estimate the number of distinct lines in a file or on stdin.
#[derive(Debug, Parser)]
#[command(name = "distinct", version)]
struct Args {
    /// Bitmap budget in KiB; larger budgets stay accurate at higher
    /// cardinalities.
    #[arg(short = 'm', long, default_value_t = 32)]
    size_kib: u64,

    /// Input file; reads stdin when omitted.
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut counter = LpcSketch::new(args.size_kib)?;

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        let token = line.trim_end();
        if token.is_empty() {
            continue;
        }
        counter.put(token);
    }

    println!("{}", counter.estimate());
    Ok(())
}
