use deck_share::{ShareConfig, TokenIssuer};

pub fn run(count: usize, seed: Option<u64>) -> Result<(), String> {
    if count == 0 {
        return Err("count must be at least 1".into());
    }

    let mut config = ShareConfig::new();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let issuer = TokenIssuer::new(&config);
    for _ in 0..count {
        println!("{}", issuer.generate());
    }

    Ok(())
}
