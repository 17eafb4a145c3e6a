use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};

use crate::error::AudioError;

/// Live microphone capture via cpal.
///
/// The cpal stream is owned by a dedicated capture thread, since streams
/// must stay on the thread that built them. The stream callback downmixes
/// to mono and pushes f32 samples into a lock-free ring buffer; the
/// consumer end lives with the caller and is drained from the tick.
///
/// # Example
/// ```no_run
/// use vx_audio::capture::CaptureLink;
/// let mut link = CaptureLink::open_default().unwrap();
/// let mut buf = Vec::new();
/// link.drain_into(&mut buf);
/// link.shutdown();
/// ```
pub struct CaptureLink {
    consumer: Consumer<f32>,
    quit_tx: flume::Sender<()>,
    sample_rate: u32,
}

impl CaptureLink {
    /// Spawn the capture thread on the default input device.
    ///
    /// Blocks until the stream is live or acquisition fails; the
    /// eventual teardown via [`shutdown`](Self::shutdown) does not block.
    ///
    /// # Errors
    /// Returns an error if there is no input device, the stream cannot
    /// be built or started, or the capture thread cannot be spawned.
    pub fn open_default() -> Result<Self, AudioError> {
        let (ready_tx, ready_rx) = flume::bounded(1);
        let (quit_tx, quit_rx) = flume::bounded(1);

        std::thread::Builder::new()
            .name("vx-capture".to_string())
            .spawn(move || capture_thread(&ready_tx, &quit_rx))?;

        match ready_rx.recv() {
            Ok(Ok((consumer, sample_rate))) => Ok(Self {
                consumer,
                quit_tx,
                sample_rate,
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AudioError::WorkerExited),
        }
    }

    /// Read available samples from the ring buffer into `out`.
    ///
    /// Returns how many samples were read.
    pub fn drain_into(&mut self, out: &mut Vec<f32>) -> usize {
        let available = self.consumer.slots();
        out.clear();
        out.reserve(available);
        let mut count = 0;
        while let Ok(sample) = self.consumer.pop() {
            out.push(sample);
            count += 1;
        }
        count
    }

    /// The sample rate of the capture stream.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Ask the capture thread to drop the stream and exit.
    ///
    /// Fire-and-forget: returns immediately, the thread unwinds on its
    /// own time. Dropping the link without calling this has the same
    /// effect through channel disconnection.
    pub fn shutdown(&self) {
        let _ = self.quit_tx.send(());
    }
}

/// Body of the capture thread: build the stream, report readiness, then
/// park until shutdown.
fn capture_thread(
    ready_tx: &flume::Sender<Result<(Consumer<f32>, u32), AudioError>>,
    quit_rx: &flume::Receiver<()>,
) {
    match build_input_stream() {
        Ok((stream, consumer, sample_rate)) => {
            if ready_tx.send(Ok((consumer, sample_rate))).is_err() {
                return;
            }
            // Keep the stream alive until shutdown or link drop.
            let _ = quit_rx.recv();
            drop(stream);
            log::debug!("capture thread exited");
        }
        Err(e) => {
            let _ = ready_tx.send(Err(e));
        }
    }
}

fn build_input_stream() -> Result<(cpal::Stream, Consumer<f32>, u32), AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(AudioError::NoInputDevice)?;

    let config = device.default_input_config()?;
    let sample_rate = config.sample_rate().0;
    let channels = usize::from(config.channels());

    // Ring buffer: 2 seconds of audio @ sample_rate
    let buf_size = sample_rate as usize * 2;
    let (mut producer, consumer) = RingBuffer::new(buf_size);

    let stream = device.build_input_stream(
        &config.into(),
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            // Downmix to mono and push into ring buffer
            for chunk in data.chunks(channels) {
                let mono: f32 = chunk.iter().sum::<f32>() / channels as f32;
                let _ = producer.push(mono);
            }
        },
        |err| {
            log::error!("audio stream error: {err}");
        },
        None,
    )?;

    stream.play()?;

    Ok((stream, consumer, sample_rate))
}
