use rust_decimal_macros::dec;
use vatmoss::core::*;
use vatmoss::vat::VatResolver;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vatmoss=debug".into()),
        )
        .init();

    let config = StoreConfig::from_env().unwrap_or_else(|_| StoreConfig::new("DE").unwrap());
    println!("Store country: {}\n", config.store_country_code());
    let resolver = VatResolver::with_rate_tables(config);

    let customers = [
        (
            "Consumer in Vienna",
            AddressBuilder::new("AT")
                .city("Wien")
                .postcode("1010")
                .phone_number("+43 1 5123456")
                .build(),
        ),
        (
            "Business in Paris (reverse charge)",
            AddressBuilder::new("FR")
                .organisation("Exemple SARL")
                .city("Paris")
                .vatin("FR12345678901")
                .build(),
        ),
        (
            "Consumer on Heligoland",
            AddressBuilder::new("DE")
                .city("Helgoland")
                .postcode("27498")
                .phone_number("+49 4725 1234")
                .build(),
        ),
        (
            "Dutch address, Belgian phone",
            AddressBuilder::new("NL")
                .city("Amsterdam")
                .postcode("1012 AB")
                .phone_number("+32 2 123 45 67")
                .build(),
        ),
        (
            "No phone number",
            AddressBuilder::new("IT").city("Roma").postcode("00100").build(),
        ),
    ];

    for (label, address) in customers {
        println!("=== {label} ===");

        let mut submission = SubmissionBuilder::new()
            .add_line(LineBuilder::new("ebook", dec!(9.99), 3).build())
            .add_line(
                LineBuilder::new("course", dec!(49.00), 1)
                    .discount(dec!(5.00))
                    .build(),
            )
            .shipping(dec!(4.90))
            .shipping_method("download")
            .shipping_address(address)
            .build()
            .unwrap();

        match resolver.apply_to(&mut submission) {
            Ok(()) => {
                for line in &submission.basket {
                    println!(
                        "  {:<8} {} x {} + tax {}",
                        line.id,
                        line.quantity,
                        line.unit_price_excl_tax,
                        line.unit_tax.unwrap_or_default()
                    );
                }
                println!(
                    "  shipping {} + tax {}",
                    submission.shipping_charge.excl_tax,
                    submission.shipping_charge.tax.unwrap_or_default()
                );
                println!(
                    "  total net {}, total tax {}\n",
                    submission.total_excl_tax(),
                    submission.total_tax().unwrap_or_default()
                );
            }
            Err(e) if e.is_unavailable() => println!("  try again later: {e}\n"),
            Err(e) => println!("  rejected: {e}\n"),
        }
    }
}
