use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::time::Instant;

use log::{debug, error, info};

use prefix_huffman::container::pack;
use prefix_huffman::{count_occurrences, entropy, normalize};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        error!("Usage: {} <input_file> [output_file]", args[0]);
        eprintln!("  📂 <input_file>:  path to the file to encode.");
        eprintln!("  💾 [output_file]: path to write the encoded output (default: output.huff).");
        std::process::exit(1);
    }

    let input_filepath = &args[1];
    let output_filepath = args.get(2).map_or("output.huff", |s| s.as_str());

    info!("--- Start Encoding ---");
    let raw_data = match fs::read(input_filepath) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read input file {}: {}", input_filepath, e);
            std::process::exit(1);
        }
    };
    let original_len = raw_data.len();

    let start_time = Instant::now();
    let encoded = match pack(&raw_data) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Encoding failed: {}", e);
            std::process::exit(1);
        }
    };
    debug!("Encoding finished in {:.2?}.", start_time.elapsed());

    let write_result =
        File::create(output_filepath).and_then(|mut file| file.write_all(&encoded));
    if let Err(e) = write_result {
        error!("Could not write encoded data to {}: {}", output_filepath, e);
        std::process::exit(1);
    }
    info!("Write successful.");

    let file_entropy = normalize(&count_occurrences(&raw_data))
        .map(|freq| entropy(&freq))
        .unwrap_or(0.0);
    let compression_ratio = if original_len > 0 {
        100.0 * (1.0 - (encoded.len() as f64) / (original_len as f64))
    } else {
        0.0
    };

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:       {} ({} bytes)\n\
         💾  Output:      {} ({} bytes)\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         🗜️  Ratio:       {:.4}%",
        input_filepath,
        original_len,
        output_filepath,
        encoded.len(),
        file_entropy,
        compression_ratio
    );
}
