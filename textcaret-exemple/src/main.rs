use log::info;

use textcaret_core::model::random_source::FixedIndex;
use textcaret_core::text::prepare::PrepareOptions;
use textcaret_core::{
    generate_text, ChainError, GenerationInput, Generator, RngSource, StartToken, TextCaret,
};

const TEXT: &str = "I love apples. John hates eating onions without using a mint afterwards";

const CORPUS: [&str; 3] = [
    "the cat sat on the mat and the cat ran to the door",
    "the dog sat on the rug and the dog slept by the door",
    "a bird sat on the fence and the bird sang to the cat",
];

/// Generates a sentence in one call and describes a dead end instead of failing.
///
/// TEXT is a single line, so most starts run out of words before 8.
fn one_shot(text: &str, word_count: usize) -> anyhow::Result<String> {
    match generate_text(text, word_count) {
        Ok(sentence) => Ok(sentence),
        Err(ChainError::DeadEnd { token, step }) => {
            Ok(format!("stopped at '{token}', word {step} has no candidate"))
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // One-shot generation with the thread-local random generator
    println!("Random sentence: {}", one_shot(TEXT, 8)?);

    // Load several texts into a single chain; texts are not bridged together
    let generator = Generator::from_texts(CORPUS)?;
    info!("Chain built with {} keys", generator.map().len());

    // Default input: 15 words, random start, no retry
    let mut input = generator.make_generation_input();

    // Number of restarts allowed when a walk reaches a word with no successor
    input.max_retries = 10;

    // Start can be 'Random' or a 'Custom' token which must exist in the chain
    input.start = StartToken::Custom("the".to_owned());

    // Number of words to generate (must be >= 1)
    input.set_word_count(6)?;

    // Invalid word count
    match input.set_word_count(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // Unknown start token
    let mut unknown = GenerationInput::new(4)?;
    unknown.start = StartToken::Custom("unicorn".to_owned());
    match generator.generate(&unknown, &mut RngSource::thread()) {
        Err(ChainError::UnknownStartToken(token)) => println!("'{token}' is not in the chain"),
        other => println!("Should not happen: {other:?}"),
    }

    // A seeded source always gives the same sentences
    let mut rng = RngSource::seeded(2024);
    for i in 0..5 {
        match generator.generate(&input, &mut rng) {
            Ok(sentence) => println!("Generated sentence {}: {sentence}", i + 1),
            Err(e) => println!("Generated sentence {}: {e}", i + 1),
        }
    }

    // Always taking the first successor is fully deterministic
    println!("First successors: {}", generator.generate(&input, &mut FixedIndex(0))?);

    // Facade: preparation and report data of a single document
    let mut caret = TextCaret::new(TEXT);
    let report = caret.visual_report(5);
    println!("Most common tokens: {:?}", report.most_common_tokens);
    println!("Stopwords: {:?}", report.stopword_frequency);
    println!("Word lengths: {:?}", report.word_length_curve);

    let prepared = caret.prepare(PrepareOptions { stopwords: true, special_chars: true });
    println!("Prepared text: {prepared}");

    Ok(())
}
