use savegame_codec::{FormatProbe, RawInput, RoundTripEncoder, SaveCategory};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <save-file> [--dump] [--repack <edited.json>] [--out <path>]",
            args[0]
        );
        process::exit(1);
    }

    let save_path = &args[1];
    let mut dump = false;
    let mut repack_path: Option<String> = None;
    let mut out_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--dump" => dump = true,
            "--repack" => match args.get(i + 1) {
                Some(path) => {
                    repack_path = Some(path.clone());
                    i += 1;
                }
                None => {
                    eprintln!("ERROR: --repack flag requires an argument.");
                    process::exit(1);
                }
            },
            "--out" => match args.get(i + 1) {
                Some(path) => {
                    out_path = Some(path.clone());
                    i += 1;
                }
                None => {
                    eprintln!("ERROR: --out flag requires an argument.");
                    process::exit(1);
                }
            },
            other => {
                eprintln!("ERROR: Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    if out_path.is_some() && repack_path.is_none() {
        eprintln!("ERROR: --out only makes sense together with --repack.");
        process::exit(1);
    }

    let bytes = match fs::read(save_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}: {}", save_path, e);
            process::exit(1);
        }
    };

    let file_name = Path::new(save_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| save_path.clone());
    let input = RawInput::new(bytes, file_name);

    println!("Probing save file: {}", save_path);
    println!("{}", "=".repeat(60));

    let parsed = match FormatProbe::new().probe(&input) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("\nERROR: Failed to decode save file");
            eprintln!("  {}", e);
            process::exit(1);
        }
    };

    println!("\nSave Information:");
    println!("  Format: {}", parsed.format);
    println!(
        "  Category: {:?}",
        SaveCategory::from_file_name(&input.file_name)
    );
    println!("  Size: {} bytes", input.bytes.len());
    println!("  Content: {}", describe_value(&parsed.value));

    if dump {
        match serde_json::to_string_pretty(&parsed.value) {
            Ok(text) => println!("\n{}", text),
            Err(e) => {
                eprintln!("ERROR: Failed to render decoded JSON: {}", e);
                process::exit(1);
            }
        }
    }

    if let Some(edited_path) = repack_path {
        let edited_text = match fs::read_to_string(&edited_path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("ERROR: Failed to read {}: {}", edited_path, e);
                process::exit(1);
            }
        };

        let edited: Value = match serde_json::from_str(&edited_text) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("ERROR: {} is not valid JSON: {}", edited_path, e);
                process::exit(1);
            }
        };

        let output = match RoundTripEncoder::new().encode(&edited, parsed.format, &input.file_name)
        {
            Ok(output) => output,
            Err(e) => {
                eprintln!("\nERROR: Failed to re-encode edited save");
                eprintln!("  {}", e);
                process::exit(1);
            }
        };

        let target = out_path.unwrap_or_else(|| output.suggested_file_name.clone());
        if let Err(e) = fs::write(&target, &output.bytes) {
            eprintln!("ERROR: Failed to write {}: {}", target, e);
            process::exit(1);
        }

        println!("\n{}", "=".repeat(60));
        println!("SUCCESS! Repacked as {}.", parsed.format);
        println!("  Output: {} ({} bytes, {})", target, output.bytes.len(), output.mime_type);
    }
}

/// One-line shape summary of the decoded value.
fn describe_value(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).take(6).collect();
            if map.len() > keys.len() {
                keys.push("...");
            }
            format!("object with {} keys ({})", map.len(), keys.join(", "))
        }
        Value::Array(items) => format!("array with {} items", items.len()),
        other => format!("{}", other),
    }
}
