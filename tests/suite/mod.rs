mod audio_loading;
mod escalation;
mod scenarios;
