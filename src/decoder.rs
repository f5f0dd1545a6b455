use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::time::Instant;

use log::{debug, error, info};

use prefix_huffman::container::unpack;
use prefix_huffman::{count_occurrences, entropy, normalize};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        error!("Usage: {} <input_file> <output_file>", args[0]);
        eprintln!("  📂 <input_file>:  path to the encoded file.");
        eprintln!("  💾 <output_file>: path to write the decoded output.");
        std::process::exit(1);
    }

    let input_filepath = &args[1];
    let output_filepath = &args[2];

    info!("--- Start Decoding ---");
    info!("Reading encoded file: {}", input_filepath);
    let content = match fs::read(input_filepath) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read encoded file: {}", e);
            std::process::exit(1);
        }
    };
    debug!("Total file size: {} bytes", content.len());

    let start_time = Instant::now();
    let decoded_data = match unpack(&content) {
        Ok(data) => data,
        Err(e) => {
            error!("Decoding failed: {}", e);
            std::process::exit(1);
        }
    };
    debug!("Bitstream decoding finished in {:.2?}.", start_time.elapsed());
    debug!("Final decoded data size: {} bytes.", decoded_data.len());

    info!("Writing decoded output to file: {}", output_filepath);
    let write_result =
        File::create(output_filepath).and_then(|mut file| file.write_all(&decoded_data));
    if let Err(e) = write_result {
        error!("Could not write decoded data: {}", e);
        std::process::exit(1);
    }
    info!("Write successful.");

    let input_size = content.len();
    let output_size = decoded_data.len();
    let file_entropy = normalize(&count_occurrences(&decoded_data))
        .map(|freq| entropy(&freq))
        .unwrap_or(0.0);
    let ratio = if output_size > 0 {
        100.0 * (1.0 - (input_size as f64) / (output_size as f64))
    } else {
        0.0
    };

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input file:        {} ({} bytes)\n\
         💾 output file:       {} ({} bytes)\n\
         ℹ️ entropy:           {:.2} bits/symbol\n\
         🗜️ compression ratio: {:.2}% (relative to decoded output)",
        input_filepath, input_size, output_filepath, output_size, file_entropy, ratio
    );

    info!("--- End ---");
}
