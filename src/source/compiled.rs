use icu_properties::{CodePointMapData, props::GeneralCategory};

use crate::{
    charset::CodePointSet,
    error::Error,
    source::{CategorySource, Property, general_category, loose_eq},
};

/// Unicode data compiled into the `icu_properties` crate, pinned to Unicode 16.0.0.
///
/// ICU does not expose the Block property, so blocks come from a built-in table.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompiledData;

/// Only the blocks the recipes name. Any other block is reported as unknown.
const BLOCKS: &[(&str, u32, u32)] = &[("Emoticons", 0x1F600, 0x1F64F)];

impl CategorySource for CompiledData {
    fn load(&self, property: Property) -> Result<CodePointSet, Error> {
        match property {
            Property::GeneralCategory(name) => {
                let category = general_category(name)
                    .ok_or_else(|| Error::load(property.to_string(), "unknown general category"))?;

                let ranges = CodePointMapData::<GeneralCategory>::new()
                    .iter_ranges_for_value(category.value)
                    .map(|range| (*range.start(), *range.end()));

                Ok(CodePointSet::from_ranges(ranges))
            }
            Property::Block(name) => BLOCKS
                .iter()
                .find(|(block, _, _)| loose_eq(block, name))
                .map(|&(_, lo, hi)| CodePointSet::from_ranges([(lo, hi)]))
                .ok_or_else(|| Error::load(property.to_string(), "unknown block")),
        }
    }
}
