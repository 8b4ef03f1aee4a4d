use vatmoss::vat::*;

fn main() {
    tracing_subscriber::fmt().with_env_filter("vatmoss=debug").init();

    let registry = match ViesRegistry::new() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("cannot create VIES client: {e}");
            return;
        }
    };

    let vatins: Vec<String> = std::env::args().skip(1).collect();
    let vatins = if vatins.is_empty() {
        vec!["ATU12345678".to_string(), "DE12345678".to_string()]
    } else {
        vatins
    };

    for vatin in &vatins {
        match registry.validate(vatin) {
            Ok(record) => println!(
                "  {vatin} => valid ({}, {})",
                record.country,
                record.name.as_deref().unwrap_or("no name")
            ),
            Err(RegistryError::Invalid { reason, .. }) => println!("  {vatin} => INVALID: {reason}"),
            Err(e) => println!("  {vatin} => lookup failed: {e}"),
        }
    }
}
