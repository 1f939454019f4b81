use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    charset::CodePointSet,
    error::{Error, ResultExt},
    source::{CategorySource, Property, general_category, loose_eq},
};

/// Unicode data read from the text files of a Unicode Character Database release.
#[derive(Debug, Clone)]
pub struct UcdDirectory {
    path: PathBuf,
    /// Ranges keyed by the short general category alias, as written in `UnicodeData.txt`.
    categories: HashMap<String, Vec<(u32, u32)>>,
    blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    name: String,
    lo: u32,
    hi: u32,
}

impl UcdDirectory {
    pub const UNICODE_DATA: &'static str = "UnicodeData.txt";
    pub const BLOCKS: &'static str = "Blocks.txt";

    pub fn open(path: &Path) -> Result<UcdDirectory, Error> {
        let unicode_data = path.join(Self::UNICODE_DATA);
        let text = fs::read_to_string(&unicode_data).loading(&unicode_data)?;
        let categories = parse_unicode_data(&text, &unicode_data)?;

        let blocks_path = path.join(Self::BLOCKS);
        let text = fs::read_to_string(&blocks_path).loading(&blocks_path)?;
        let blocks = parse_blocks(&text, &blocks_path)?;

        Ok(UcdDirectory {
            path: path.to_path_buf(),
            categories,
            blocks,
        })
    }
}

impl CategorySource for UcdDirectory {
    fn load(&self, property: Property) -> Result<CodePointSet, Error> {
        match property {
            Property::GeneralCategory(name) => {
                let category = general_category(name)
                    .ok_or_else(|| Error::load(property.to_string(), "unknown general category"))?;

                // A category without any assigned code points is simply absent from the file
                Ok(self
                    .categories
                    .get(category.short)
                    .map(|ranges| CodePointSet::from_ranges(ranges.iter().copied()))
                    .unwrap_or_default())
            }
            Property::Block(name) => self
                .blocks
                .iter()
                .find(|block| loose_eq(&block.name, name))
                .map(|block| CodePointSet::from_ranges([(block.lo, block.hi)]))
                .ok_or_else(|| {
                    Error::load(
                        property.to_string(),
                        format!(
                            "no such block in {}",
                            self.path.join(Self::BLOCKS).display()
                        ),
                    )
                }),
        }
    }
}

fn line_error(file: &Path, line: usize, reason: impl ToString) -> Error {
    Error::load(format!("{}:{}", file.display(), line + 1), reason)
}

fn parse_code_point(file: &Path, line: usize, field: &str) -> Result<u32, Error> {
    u32::from_str_radix(field.trim(), 16)
        .ok()
        .filter(|&cp| cp <= crate::charset::MAX_CODE_POINT)
        .ok_or_else(|| line_error(file, line, format_args!("invalid code point {field:?}")))
}

fn parse_unicode_data(text: &str, file: &Path) -> Result<HashMap<String, Vec<(u32, u32)>>, Error> {
    let mut categories: HashMap<String, Vec<(u32, u32)>> = HashMap::new();
    // Large ranges are written as a `<..., First>` line followed by a `<..., Last>` line
    let mut range_start: Option<(usize, u32, &str)> = None;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(';').collect();
        let &[code_point, name, category, ..] = fields.as_slice() else {
            return Err(line_error(file, index, "expected at least three fields"));
        };

        let code_point = parse_code_point(file, index, code_point)?;
        let category = category.trim();

        if name.ends_with(", First>") {
            if range_start.is_some() {
                return Err(line_error(file, index, "range start without an end"));
            }
            range_start = Some((index, code_point, category));
            continue;
        }

        let lo = if name.ends_with(", Last>") {
            match range_start.take() {
                Some((_, lo, start_category)) if start_category == category && lo <= code_point => {
                    lo
                }
                _ => return Err(line_error(file, index, "range end does not match its start")),
            }
        } else if range_start.is_some() {
            return Err(line_error(file, index, "range start without an end"));
        } else {
            code_point
        };

        categories
            .entry(category.to_string())
            .or_default()
            .push((lo, code_point));
    }

    if let Some((index, _, _)) = range_start {
        return Err(line_error(file, index, "range start without an end"));
    }

    Ok(categories)
}

fn parse_blocks(text: &str, file: &Path) -> Result<Vec<Block>, Error> {
    let mut blocks = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(content, _)| content).trim();

        if line.is_empty() {
            continue;
        }

        let Some((range, name)) = line.split_once(';') else {
            return Err(line_error(file, index, "expected a range and a block name"));
        };

        let Some((lo, hi)) = range.split_once("..") else {
            return Err(line_error(file, index, format_args!("invalid range {range:?}")));
        };

        let lo = parse_code_point(file, index, lo)?;
        let hi = parse_code_point(file, index, hi)?;

        if lo > hi {
            return Err(line_error(file, index, format_args!("invalid range {range:?}")));
        }

        blocks.push(Block {
            name: name.trim().to_string(),
            lo,
            hi,
        });
    }

    Ok(blocks)
}
