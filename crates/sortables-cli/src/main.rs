#![forbid(unsafe_code)]

fn main() {
    let json = sortables_cli::wants_json_errors();
    if let Err(error) = sortables_cli::run_from_env() {
        if json {
            eprintln!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "error": error.to_string(),
                    "exit_code": error.exit_code(),
                })
            );
        } else {
            eprintln!("sortables: {error}");
        }
        std::process::exit(error.exit_code());
    }
}
