//! Platform-specific speech backends

// Native TTS backend using the tts crate (cross-platform)
pub mod native;

// espeak-ng subprocess backend for WSL/WSLG and bare Linux
pub mod espeak;
