use std::{fs::File, path::Path};

use log::info;
use memmap2::{Advice, Mmap};
use thiserror::Error;
use tsp_core::instance::TSPInstance;

use crate::{
    data::parse_data_sections,
    metadata::{MetaDataParseError, parse_metadata},
};

pub mod data;
pub mod metadata;
pub mod params;
pub mod tour_file;

/// A memory-mapped file's raw bytes, as handed to every line-scanning parser in this crate.
pub type FileContent = [u8];

#[derive(Error, Debug)]
pub enum ParserError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    MetaDataParsing(#[from] MetaDataParseError),
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),
    #[error("expected {expected} numeric values in {section}, found {found}")]
    WrongValueCount {
        section: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{section} is not supported by this parser")]
    UnsupportedSection { section: &'static str },
}

/// Parses a TSPLIB95 problem file into a [`TSPInstance`].
pub fn parse_tsp_instance<P: AsRef<Path>>(instance_path: P) -> Result<TSPInstance, ParserError> {
    // SAFETY: the file is opened read-only for the duration of this call and not modified
    // concurrently by this process; the caller owns exclusivity over `instance_path`.
    let mmap = unsafe { Mmap::map(&File::open(instance_path)?)? };
    mmap.advise(Advice::Sequential)?;
    let mut index_in_map = 0;

    let (mut metadata, data_keyword) = parse_metadata(&mmap, &mut index_in_map)?;
    info!(
        "Parsed metadata for instance \"{}\": dimension {}",
        metadata.name, metadata.dimension
    );

    let distances = parse_data_sections(&mmap, &mut index_in_map, data_keyword, &mut metadata)?;

    Ok(TSPInstance::new(distances, metadata))
}
