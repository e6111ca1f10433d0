//! cpal-backed capture device.
//!
//! The cpal stream is `!Send`, so it lives on a dedicated thread for the
//! whole session: the thread builds the stream, buffers f32 samples from
//! the input callback, and on stop encodes everything to one WAV chunk
//! and flushes it into the controller's sink. The device handle held by
//! the controller only carries the thread's control channel, which is
//! `Send`.

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::io::Cursor;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use super::{AudioEncoding, CaptureDevice, CaptureSource, ChunkSink};
use crate::error::{Error, Result};

const PERMISSION_MESSAGE: &str = "Microphone access is required for recording";

/// Acquires cpal input devices, optionally pinned to a device name.
#[derive(Debug, Clone, Default)]
pub struct CpalCaptureSource {
    device_name: Option<String>,
}

impl CpalCaptureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(name: impl Into<String>) -> Self {
        Self {
            device_name: Some(name.into()),
        }
    }
}

#[async_trait]
impl CaptureSource for CpalCaptureSource {
    async fn acquire(&self) -> Result<Box<dyn CaptureDevice>> {
        // Probe for the device now so denial surfaces at start time; the
        // capture thread re-opens it when the stream is built.
        find_device(self.device_name.as_deref())?;
        Ok(Box::new(CpalCaptureDevice {
            device_name: self.device_name.clone(),
            worker: None,
        }))
    }
}

struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<Result<()>>,
}

pub struct CpalCaptureDevice {
    device_name: Option<String>,
    worker: Option<Worker>,
}

#[async_trait]
impl CaptureDevice for CpalCaptureDevice {
    fn supports(&self, encoding: AudioEncoding) -> bool {
        encoding == AudioEncoding::Wav
    }

    async fn start(&mut self, _encoding: AudioEncoding, sink: ChunkSink) -> Result<()> {
        if self.worker.is_some() {
            return Err(Error::Capture("capture already running".into()));
        }

        let (ready_tx, ready_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();
        let device_name = self.device_name.clone();
        let handle =
            std::thread::spawn(move || run_capture(device_name, sink, ready_tx, stop_rx));

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.worker = Some(Worker { stop_tx, handle });
                Ok(())
            }
            Ok(Err(message)) => {
                let _ = handle.join();
                Err(Error::Capture(message))
            }
            Err(_) => {
                let _ = handle.join();
                Err(Error::Capture("capture thread died during startup".into()))
            }
        }
    }

    async fn stop(&mut self) -> Result<()> {
        let worker = self
            .worker
            .take()
            .ok_or_else(|| Error::Capture("capture not running".into()))?;
        let _ = worker.stop_tx.send(());
        match worker.handle.join() {
            Ok(result) => result,
            Err(_) => Err(Error::Capture("capture thread panicked".into())),
        }
    }
}

fn run_capture(
    device_name: Option<String>,
    sink: ChunkSink,
    ready_tx: mpsc::Sender<std::result::Result<(), String>>,
    stop_rx: mpsc::Receiver<()>,
) -> Result<()> {
    let (stream, samples, channels, sample_rate) = match open_stream(device_name.as_deref()) {
        Ok(parts) => parts,
        Err(e) => {
            let _ = ready_tx.send(Err(e.to_string()));
            return Err(e);
        }
    };
    let _ = ready_tx.send(Ok(()));

    // Park until the controller signals stop (or drops the device).
    let _ = stop_rx.recv();
    drop(stream);

    let samples = std::mem::take(
        &mut *samples.lock().unwrap_or_else(PoisonError::into_inner),
    );
    let wav = encode_wav(&samples, channels, sample_rate)?;
    sink.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(wav);
    Ok(())
}

type OpenedStream = (cpal::Stream, Arc<Mutex<Vec<f32>>>, u16, u32);

fn open_stream(device_name: Option<&str>) -> Result<OpenedStream> {
    let device = find_device(device_name)?;
    let supported = device
        .default_input_config()
        .map_err(|e| Error::Capture(format!("No usable input config: {e}")))?;
    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.config();
    let channels = config.channels;
    let sample_rate = config.sample_rate;

    let samples = Arc::new(Mutex::new(Vec::new()));
    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&samples)),
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&samples)),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&samples)),
        other => Err(Error::Capture(format!("Unsupported sample format: {other:?}"))),
    }?;
    stream
        .play()
        .map_err(|e| Error::Capture(format!("Failed to start input stream: {e}")))?;
    Ok((stream, samples, channels, sample_rate))
}

fn find_device(device_name: Option<&str>) -> Result<cpal::Device> {
    let host = cpal::default_host();
    match device_name {
        Some(name) => host
            .input_devices()
            .map_err(|e| Error::Capture(e.to_string()))?
            .find(|d| d.name().map(|n| n == name).unwrap_or(false))
            .ok_or_else(|| Error::Permission(PERMISSION_MESSAGE.to_string())),
        None => host
            .default_input_device()
            .ok_or_else(|| Error::Permission(PERMISSION_MESSAGE.to_string())),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let err_fn = |err| tracing::warn!("audio stream error (non-fatal): {err}");
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mut buf = samples.lock().unwrap_or_else(PoisonError::into_inner);
                buf.extend(data.iter().map(|&s| -> f32 { cpal::Sample::from_sample(s) }));
            },
            err_fn,
            None,
        )
        .map_err(|e| Error::Capture(format!("Failed to open input stream: {e}")))
}

fn encode_wav(samples: &[f32], channels: u16, sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| Error::Capture(format!("WAV encoding failed: {e}")))?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(value)
            .map_err(|e| Error::Capture(format!("WAV encoding failed: {e}")))?;
    }
    writer
        .finalize()
        .map_err(|e| Error::Capture(format!("WAV encoding failed: {e}")))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_carries_spec() {
        let wav = encode_wav(&[0.0, 0.5, -0.5, 1.5], 1, 16000).unwrap();
        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let wav = encode_wav(&[2.0, -2.0], 1, 8000).unwrap();
        let samples: Vec<i16> = hound::WavReader::new(Cursor::new(wav))
            .unwrap()
            .into_samples::<i16>()
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(samples, vec![i16::MAX, i16::MIN + 1]);
    }
}
