//! Verse-by-verse recitation.
//!
//! [`play_all`] drives a [`Playback`] state machine over a view's clips:
//! each clip is handed to an [`AudioSink`], and when it ends playback
//! advances to the next verse. A stop signal halts the clip in flight and
//! resets playback. A clip that fails to start stops playback silently
//! (logged, not surfaced).

use std::future::Future;
use std::process::Stdio;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Serialize;

use kalam_core::error::ViewError;
use kalam_core::playback::Playback;

use crate::provider::AudioClip;

/// Something that can play one clip at a time.
#[async_trait]
pub trait AudioSink: Send {
    /// Play `clip`, resolving when it has finished.
    async fn play(&mut self, clip: &AudioClip) -> Result<()>;

    /// Halt the clip in flight, if any.
    async fn halt(&mut self) -> Result<()>;
}

/// Prints each clip URL instead of playing it.
pub struct PrintSink;

#[async_trait]
impl AudioSink for PrintSink {
    async fn play(&mut self, clip: &AudioClip) -> Result<()> {
        println!("  ▶ {}", clip.url);
        Ok(())
    }

    async fn halt(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Runs an external player per clip, e.g. `mpv --no-video <url>`.
pub struct CommandSink {
    program: String,
    args: Vec<String>,
    child: Option<tokio::process::Child>,
}

impl CommandSink {
    /// `command` is the program followed by its fixed arguments.
    pub fn new(command: &[String]) -> Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("audio player command is empty");
        };
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            child: None,
        })
    }
}

#[async_trait]
impl AudioSink for CommandSink {
    async fn play(&mut self, clip: &AudioClip) -> Result<()> {
        let child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(&clip.url)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        let child = self.child.insert(child);
        let status = child.wait().await?;
        self.child = None;
        if !status.success() {
            bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }

    async fn halt(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            child.kill().await?;
        }
        Ok(())
    }
}

/// How a play-all run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "end", rename_all = "snake_case")]
pub enum PlaybackEnd {
    /// Every clip from the start index played to the end.
    Completed,
    /// The stop signal fired.
    Stopped,
    /// A clip failed; playback stopped.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackReport {
    pub played: usize,
    pub end: PlaybackEnd,
}

/// Play `clips` from `start` until the end, a failure, or `stop` resolves.
///
/// `on_verse` is called with each index just before its clip starts.
pub async fn play_all<S, F>(
    sink: &mut S,
    clips: &[AudioClip],
    start: usize,
    mut on_verse: impl FnMut(usize),
    stop: F,
) -> Result<PlaybackReport>
where
    S: AudioSink + ?Sized,
    F: Future<Output = ()>,
{
    let mut playback = Playback::new(clips.len());
    playback.start(start);
    tokio::pin!(stop);

    let mut played = 0;
    while let Some(index) = playback.current() {
        on_verse(index);
        let clip = &clips[index];

        let finished = tokio::select! {
            result = sink.play(clip) => Some(result),
            _ = &mut stop => None,
        };

        match finished {
            Some(Ok(())) => {
                played += 1;
                playback.item_finished();
            }
            Some(Err(e)) => {
                let error = ViewError::PlaybackError {
                    global_verse: clip.global_verse as u32,
                    reason: format!("{:#}", e),
                };
                log::warn!("{}", error);
                playback.failed();
                return Ok(PlaybackReport {
                    played,
                    end: PlaybackEnd::Failed {
                        error: error.to_string(),
                    },
                });
            }
            None => {
                sink.halt().await?;
                playback.stop();
                return Ok(PlaybackReport {
                    played,
                    end: PlaybackEnd::Stopped,
                });
            }
        }
    }

    Ok(PlaybackReport {
        played,
        end: PlaybackEnd::Completed,
    })
}
