use text_anomaly_scorer::{AnomalyScorer, BucketBoundaries};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // tokenized corpus
    let texts = [
        "rust is fast and rust is safe",
        "rust is safe and the borrow checker is strict",
        "the borrow checker keeps rust safe and fast",
        "lorem ipsum dolor sit amet consectetur adipiscing",
    ];
    let corpus: Vec<Vec<&str>> = texts.iter().map(|t| t.split_whitespace().collect()).collect();

    // small vocabulary -> narrow bands
    let scorer = AnomalyScorer::with_boundaries(BucketBoundaries::new(vec![3, 8, usize::MAX])?);
    let scores = scorer.score_documents(&corpus)?;

    for (text, score) in texts.iter().zip(&scores) {
        println!("{:.6}  {}", score, text);
    }

    let profile = scorer.profile(&corpus)?;
    println!(
        "vocab: {}, tokens: {}, universe: {:?}",
        profile.vocab_size(),
        profile.universe_token_count(),
        profile.universe().as_slice()
    );
    Ok(())
}
