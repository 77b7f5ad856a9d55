//! Test helpers: a scripted transcoder and log capture
//!
//! Scripted containers are a real 77-byte header followed by a level table.
//! For each image of `total_images`: one byte holding the level count, then
//! a little-endian `u16` width and height per level. Header `userdata0 != 0`
//! makes `start_transcoding` fail; `userdata1 == n + 1` fails level `n`.

use std::cell::Cell;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::basis::{
    Codebook, EngineError, FileSummary, ImageInfo, LevelDesc, TranscodeRequest, Transcoder,
};
use crate::formats::basis::{BASIS_HEADER_SIZE, BasisFileHeader, HeaderFlags};

thread_local! {
    static CREATED: Cell<u32> = const { Cell::new(0) };
    static STOPPED: Cell<u32> = const { Cell::new(0) };
    static DROPPED: Cell<u32> = const { Cell::new(0) };
}

/// Session lifecycle counts on the current test thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCounters {
    pub created: u32,
    pub stopped: u32,
    pub dropped: u32,
}

impl SessionCounters {
    pub fn read() -> Self {
        Self {
            created: CREATED.with(Cell::get),
            stopped: STOPPED.with(Cell::get),
            dropped: DROPPED.with(Cell::get),
        }
    }
}

fn bump(counter: &'static std::thread::LocalKey<Cell<u32>>) {
    counter.with(|count| count.set(count.get() + 1));
}

pub struct ScriptedTranscoder {
    started: bool,
}

impl ScriptedTranscoder {
    fn levels(data: &[u8]) -> Option<(BasisFileHeader, Vec<Vec<(u32, u32)>>)> {
        let header = BasisFileHeader::parse(data).ok()?;
        let mut cursor = Cursor::new(data.get(BASIS_HEADER_SIZE..)?);
        let mut images = Vec::new();
        for _ in 0..header.total_images {
            let count = cursor.read_u8().ok()?;
            let mut levels = Vec::new();
            for _ in 0..count {
                let width = cursor.read_u16::<LittleEndian>().ok()?;
                let height = cursor.read_u16::<LittleEndian>().ok()?;
                levels.push((u32::from(width), u32::from(height)));
            }
            images.push(levels);
        }
        Some((header, images))
    }
}

impl Drop for ScriptedTranscoder {
    fn drop(&mut self) {
        bump(&DROPPED);
    }
}

impl Transcoder for ScriptedTranscoder {
    fn new(_codebook: &'static Codebook) -> Self {
        bump(&CREATED);
        Self { started: false }
    }

    fn validate_header(&self, data: &[u8]) -> bool {
        BasisFileHeader::parse(data).is_ok()
    }

    fn file_summary(&self, data: &[u8]) -> Option<FileSummary> {
        let (header, images) = Self::levels(data)?;
        Some(FileSummary {
            image_count: header.total_images,
            level_counts: images.iter().map(|levels| levels.len() as u32).collect(),
            y_flipped: header.flags.y_flipped(),
        })
    }

    fn start_transcoding(&mut self, data: &[u8]) -> bool {
        let Ok(header) = BasisFileHeader::parse(data) else {
            return false;
        };
        self.started = header.userdata0 == 0;
        self.started
    }

    fn stop_transcoding(&mut self) {
        if self.started {
            bump(&STOPPED);
            self.started = false;
        }
    }

    fn image_info(&self, data: &[u8], image: u32) -> Option<ImageInfo> {
        let (_, images) = Self::levels(data)?;
        let levels = images.get(image as usize)?;
        let &(width, height) = levels.first()?;
        Some(ImageInfo {
            level_count: levels.len() as u32,
            width,
            height,
        })
    }

    fn level_desc(&self, data: &[u8], image: u32, level: u32) -> Option<LevelDesc> {
        let (_, images) = Self::levels(data)?;
        let &(width, height) = images.get(image as usize)?.get(level as usize)?;
        Some(LevelDesc {
            width,
            height,
            total_blocks: width.div_ceil(4) * height.div_ceil(4),
        })
    }

    fn transcode_level(
        &self,
        data: &[u8],
        request: &TranscodeRequest,
        output: &mut [u8],
    ) -> Result<(), EngineError> {
        assert!(self.started, "transcode before start_transcoding");
        let (header, _) = Self::levels(data).ok_or(EngineError::Failed("bad table".into()))?;
        if header.userdata1 == request.level + 1 {
            return Err(EngineError::Failed(format!("scripted failure at level {}", request.level)));
        }
        let expected =
            request.unit_count as usize * request.format.bytes_per_block_or_pixel() as usize;
        if output.len() != expected {
            return Err(EngineError::OutputSizeMismatch {
                expected,
                actual: output.len(),
            });
        }
        output.fill((request.image * 16 + request.level) as u8);
        Ok(())
    }
}

/// Header for a scripted container with `images` images
pub fn scripted_header(images: u32, flags: u16) -> BasisFileHeader {
    BasisFileHeader {
        version: 0x13,
        header_size: BASIS_HEADER_SIZE as u16,
        total_images: images,
        total_slices: images,
        flags: HeaderFlags(flags | HeaderFlags::ETC1S),
        ..Default::default()
    }
}

/// Scripted container with the given per-image level sizes
pub fn fixture(images: &[&[(u16, u16)]], flags: u16) -> Vec<u8> {
    fixture_with(scripted_header(images.len() as u32, flags), images)
}

pub fn fixture_with(header: BasisFileHeader, images: &[&[(u16, u16)]]) -> Vec<u8> {
    let mut out = header.to_bytes().unwrap();
    for levels in images {
        out.write_u8(levels.len() as u8).unwrap();
        for &(width, height) in *levels {
            out.write_u16::<LittleEndian>(width).unwrap();
            out.write_u16::<LittleEndian>(height).unwrap();
        }
    }
    out
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber recording every event, return its result and
/// the formatted log
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
