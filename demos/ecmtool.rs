//! Run every sector of a raw 2352 byte/sector CD image through the codec,
//! check that each one is rebuilt bit-exact and print some statistics.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use ecmcodec::{Decoder, EccEdc, Encoder, Optimizations, SectorType, SECTOR_SIZE};

#[derive(Parser)]
#[command(name = "ecmtool")]
#[command(about = "Measure how well a raw CD image compresses", long_about = None)]
struct Cli {
    /// Raw image, 2352 bytes per sector
    image: PathBuf,

    /// Optimizations not to apply
    #[arg(short, long, value_delimiter = ',')]
    keep: Vec<Field>,

    /// Apply the optimizations even when the sector can't be rebuilt
    #[arg(short, long)]
    force: bool,

    /// Absolute index of the first sector in the image
    #[arg(short, long, default_value_t = 150)]
    start: u32,
}

#[derive(ValueEnum, Clone, Copy)]
enum Field {
    Sync,
    Msf,
    Mode,
    Blanks,
    Flags,
    Ecc,
    Edc,
    Gap,
}

impl Field {
    fn optimization(self) -> Optimizations {
        match self {
            Field::Sync => Optimizations::REMOVE_SYNC,
            Field::Msf => Optimizations::REMOVE_MSF,
            Field::Mode => Optimizations::REMOVE_MODE,
            Field::Blanks => Optimizations::REMOVE_BLANKS,
            Field::Flags => Optimizations::REMOVE_REDUNDANT_FLAG,
            Field::Ecc => Optimizations::REMOVE_ECC,
            Field::Edc => Optimizations::REMOVE_EDC,
            Field::Gap => Optimizations::REMOVE_GAP,
        }
    }
}

#[derive(Default)]
struct Stats {
    sectors: u64,
    encoded: u64,
    downgraded: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let opts = cli
        .keep
        .iter()
        .fold(Optimizations::all(), |o, f| o - f.optimization());

    let tables = EccEdc::new();
    let encoder = Encoder::new(&tables);
    let decoder = Decoder::new(&tables);

    let mut image = BufReader::new(File::open(&cli.image)?);
    let mut raw = [0u8; SECTOR_SIZE];
    let mut rebuilt = [0u8; SECTOR_SIZE];
    let mut stats: BTreeMap<SectorType, Stats> = BTreeMap::new();
    let mut index = cli.start;

    loop {
        match image.read_exact(&mut raw) {
            Ok(()) => (),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }

        let encoded = encoder.encode_at(&raw, opts, cli.force, index)?;
        let t = encoded.sector_type();
        let wanted = opts & t.supported_optimizations();

        decoder.decode(encoded.data(), t, encoded.optimizations(), index, &mut rebuilt)?;

        if rebuilt != raw {
            println!("Sector {} ({}) isn't rebuilt bit-exact", index, t);
        }

        let s = stats.entry(t).or_default();
        s.sectors += 1;
        s.encoded += encoded.data().len() as u64;
        if encoded.optimizations() != wanted {
            s.downgraded += 1;
        }

        index += 1;
    }

    let mut total = Stats::default();

    println!("{:<16} {:>10} {:>14} {:>10}", "type", "sectors", "encoded bytes", "downgraded");
    for (t, s) in &stats {
        println!(
            "{:<16} {:>10} {:>14} {:>10}",
            t.to_string(),
            s.sectors,
            s.encoded,
            s.downgraded
        );

        total.sectors += s.sectors;
        total.encoded += s.encoded;
        total.downgraded += s.downgraded;
    }

    let raw_size = total.sectors * SECTOR_SIZE as u64;

    println!(
        "{} sectors, {} bytes -> {} bytes ({:.2}%)",
        total.sectors,
        raw_size,
        total.encoded,
        if raw_size == 0 {
            0.
        } else {
            total.encoded as f64 * 100. / raw_size as f64
        }
    );

    Ok(())
}
