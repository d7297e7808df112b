//! Integration tests for speech synthesis
//!
//! These run against whatever backend the machine offers. Without any
//! speech support the silent backend is used, so nothing here may fail
//! just because the host is headless.

use spellpal::speech::{create_synth, SpeechOutput, SpeechSettings};

#[test]
fn test_create_synth_never_fails() {
    let mut synth = create_synth();
    match synth.voices() {
        Ok(voices) => println!("✓ Backend reports {} voices", voices.len()),
        Err(e) => println!("⚠ Voice listing failed (may be expected): {}", e),
    }
}

#[test]
fn test_speech_output_operations() {
    let mut speech = SpeechOutput::new(create_synth(), SpeechSettings::default());

    // Errors are swallowed, so these only need to return
    speech.speak("Integration test");
    speech.speak("");
    speech.speak("Emoji: 🎉");
    speech.poll_voices();
    speech.cancel();

    println!(
        "✓ Speech operations done, voice: {:?}",
        speech.preferred_voice().map(|v| v.name.clone())
    );
}
