//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{Result, SkillGapError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, OcrExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, Option<String>>,
    enable_cache: bool,
    min_text_chars: usize,
    ocr: Option<OcrExtractor>,
}

impl InputManager {
    pub fn new(config: &InputConfig) -> Result<Self> {
        let ocr = match &config.ocr_command {
            Some(command) => Some(OcrExtractor::from_command(command)?),
            None => None,
        };

        Ok(Self {
            cache: HashMap::new(),
            enable_cache: config.enable_caching,
            min_text_chars: config.min_text_chars,
            ocr,
        })
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Text of the document at `path`.
    ///
    /// `Ok(None)` means the document exists but yielded no text (e.g. a PDF
    /// that could not be parsed); callers treat that like an empty document.
    pub async fn extract_text(&mut self, path: &Path) -> Result<Option<String>> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(SkillGapError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                match PdfExtractor.extract(path).await {
                    Ok(text) => Some(text),
                    Err(SkillGapError::PdfExtraction(message)) => {
                        warn!("{}", message);
                        None
                    }
                    Err(e) => return Err(e),
                }
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                Some(PlainTextExtractor.extract(path).await?)
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                Some(MarkdownExtractor.extract(path).await?)
            }
            FileType::Unknown => {
                return Err(SkillGapError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        let text = self.ocr_fallback(path, file_type, text).await;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Replace a too-short extraction with OCR output when OCR is configured
    /// and produces more text. OCR failures keep the original text.
    async fn ocr_fallback(&self, path: &Path, file_type: FileType, text: Option<String>) -> Option<String> {
        let extracted_len = text.as_deref().map_or(0, |t| t.trim().chars().count());
        if extracted_len >= self.min_text_chars || !file_type.supports_ocr() {
            return text;
        }
        let ocr = match &self.ocr {
            Some(ocr) => ocr,
            None => {
                debug!("Only {} characters extracted and no OCR command configured", extracted_len);
                return text;
            }
        };

        info!("Only {} characters extracted, running OCR on {}", extracted_len, path.display());
        match ocr.extract(path).await {
            Ok(ocr_text) if ocr_text.trim().chars().count() > extracted_len => Some(ocr_text),
            Ok(_) => {
                debug!("OCR did not produce more text");
                text
            }
            Err(e) => {
                warn!("OCR failed: {}", e);
                text
            }
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                SkillGapError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
