use chrono::NaiveDateTime;
use csv::Reader;
use std::env;
use std::error::Error;
use std::fs::File;
use std::path::Path;
use trend_core::{Candle, FitConfig, RollingAnalyzer};

fn main() -> Result<(), Box<dyn Error>> {
    let data_dir = env::args()
        .nth(1)
        .unwrap_or_else(|| "/opt/data/raw_data".to_string());

    for entry in std::fs::read_dir(Path::new(&data_dir))? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) == Some("csv") {
            println!("Processing file: {:?}", path);
            process_csv_file(&path)?;
        }
    }

    Ok(())
}

fn process_csv_file(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);
    let mut candles = Vec::new();

    for result in rdr.records() {
        let record = result?;
        candles.push(parse_candle(&record)?);
    }

    // Sort by timestamp
    candles.sort_by_key(|c| c.time);

    let symbol = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    let analyzer = RollingAnalyzer::new(FitConfig::default());
    let slopes = analyzer.analyze(symbol, &candles)?;
    let channels = analyzer.render_last(symbol, &candles)?;

    println!("Analysis completed for {:?}", path);
    println!("Number of candles: {}", candles.len());
    println!("Fitted windows: {}", slopes.fitted_count());

    let last_support = slopes.support_slope.last().copied().flatten();
    let last_resist = slopes.resist_slope.last().copied().flatten();
    if let (Some(s), Some(r)) = (last_support, last_resist) {
        println!("Last window support slope: {:.6}", s);
        println!("Last window resistance slope: {:.6}", r);
    } else {
        println!("No trend line could be fit for the last window");
    }

    println!("{}", serde_json::to_string_pretty(&channels)?);

    Ok(())
}

fn parse_candle(record: &csv::StringRecord) -> Result<Candle, Box<dyn Error>> {
    let time = NaiveDateTime::parse_from_str(&record[0], "%Y-%m-%d %H:%M:%S")?;

    Ok(Candle::new(
        time,
        record[1].parse()?,
        record[2].parse()?,
        record[3].parse()?,
        record[4].parse()?,
    )?)
}
