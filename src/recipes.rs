use crate::{
    charset::CodePointSet,
    error::Error,
    source::{CategorySource, Property},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Category(&'static str),
    Block(&'static str),
    /// The finished contents of a table defined earlier in the recipe list
    Table(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Values(&'static [char]),
    Range(char, char),
}

/// How to build one generated table: the union of every input, minus every exclusion.
#[derive(Debug, Clone, Copy)]
pub struct Recipe {
    pub name: &'static str,
    pub include: &'static [Input],
    pub exclude: &'static [Exclusion],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub code_points: CodePointSet,
}

// ASCII identifier characters are matched directly by the lexer, never through the tables.
pub const RECIPES: &[Recipe] = &[
    Recipe {
        name: "space_separator",
        include: &[Input::Category("Space_Separator")],
        exclude: &[Exclusion::Values(&[
            '\t', '\u{B}', '\u{C}', ' ', '\u{A0}', '\u{FEFF}',
        ])],
    },
    Recipe {
        name: "id_start",
        include: &[
            Input::Category("Uppercase_Letter"),
            Input::Category("Lowercase_Letter"),
            Input::Category("Titlecase_Letter"),
            Input::Category("Modifier_Letter"),
            Input::Category("Other_Letter"),
            Input::Category("Letter_Number"),
            Input::Block("Emoticons"),
        ],
        exclude: &[
            Exclusion::Values(&['$', '_']),
            Exclusion::Range('A', 'Z'),
            Exclusion::Range('a', 'z'),
        ],
    },
    Recipe {
        name: "id_continue",
        include: &[
            Input::Table("id_start"),
            Input::Category("Nonspacing_Mark"),
            Input::Category("Spacing_Mark"),
            Input::Category("Decimal_Number"),
            Input::Category("Connector_Punctuation"),
        ],
        exclude: &[
            Exclusion::Values(&['$', '_']),
            Exclusion::Range('0', '9'),
            Exclusion::Range('A', 'Z'),
            Exclusion::Range('a', 'z'),
        ],
    },
];

/// Evaluate recipes in order. Any failure aborts the whole build.
pub fn build_tables(recipes: &[Recipe], source: &impl CategorySource) -> Result<Vec<Table>, Error> {
    let mut tables: Vec<Table> = Vec::with_capacity(recipes.len());

    for recipe in recipes {
        let code_points = build_table(recipe, &tables, source)?;
        tables.push(Table {
            name: recipe.name,
            code_points,
        });
    }

    Ok(tables)
}

fn build_table(
    recipe: &Recipe,
    built: &[Table],
    source: &impl CategorySource,
) -> Result<CodePointSet, Error> {
    let mut loaded = Vec::with_capacity(recipe.include.len());

    for input in recipe.include {
        let set = match *input {
            Input::Category(name) => source.load(Property::GeneralCategory(name))?,
            Input::Block(name) => source.load(Property::Block(name))?,
            Input::Table(name) => built
                .iter()
                .find(|table| table.name == name)
                .map(|table| table.code_points.clone())
                .ok_or_else(|| Error::UndefinedTable {
                    name: name.to_string(),
                })?,
        };

        loaded.push(set);
    }

    let mut set = CodePointSet::union(&loaded);

    for exclusion in recipe.exclude {
        set = match *exclusion {
            Exclusion::Values(values) => set.remove_values(values.iter().map(|&ch| ch as u32)),
            Exclusion::Range(low, high) => set.remove_range(low, high)?,
        };
    }

    Ok(set)
}

#[cfg(test)]
mod test {
    use super::{Exclusion, Input, RECIPES, Recipe, build_tables};
    use crate::{
        charset::CodePointSet,
        error::Error,
        source::{CategorySource, Property},
    };

    /// An in-memory stand-in for the Unicode data.
    struct FakeSource(Vec<(Property<'static>, CodePointSet)>);

    impl FakeSource {
        fn new(entries: &[(Property<'static>, &[u32])]) -> FakeSource {
            FakeSource(
                entries
                    .iter()
                    .map(|&(property, cps)| {
                        (property, CodePointSet::from_code_points(cps.iter().copied()))
                    })
                    .collect(),
            )
        }
    }

    impl CategorySource for FakeSource {
        fn load(&self, property: Property) -> Result<CodePointSet, Error> {
            self.0
                .iter()
                .find(|(known, _)| *known == property)
                .map(|(_, set)| set.clone())
                .ok_or_else(|| Error::load(property.to_string(), "not available"))
        }
    }

    fn full_source() -> FakeSource {
        use Property::{Block, GeneralCategory as Gc};

        FakeSource::new(&[
            (Gc("Space_Separator"), &[0x20, 0xA0, 0x1680, 0x3000]),
            (Gc("Uppercase_Letter"), &[0x41, 0x5A, 0xC0]),
            (Gc("Lowercase_Letter"), &[0x61, 0x7A, 0xDF]),
            (Gc("Titlecase_Letter"), &[0x1C5]),
            (Gc("Modifier_Letter"), &[0x2B0]),
            (Gc("Other_Letter"), &[0xAA, 0x5D0]),
            (Gc("Letter_Number"), &[0x16EE]),
            (Block("Emoticons"), &[0x1F600, 0x1F601]),
            (Gc("Nonspacing_Mark"), &[0x300]),
            (Gc("Spacing_Mark"), &[0x903]),
            (Gc("Decimal_Number"), &[0x30, 0x39, 0x660]),
            (Gc("Connector_Punctuation"), &[0x5F, 0x203F]),
        ])
    }

    fn forbidden_ascii() -> impl Iterator<Item = u32> {
        ('0'..='9')
            .chain('A'..='Z')
            .chain('a'..='z')
            .chain(['$', '_'])
            .map(|ch| ch as u32)
    }

    #[test]
    fn table_names_in_order() {
        let names: Vec<_> = RECIPES.iter().map(|recipe| recipe.name).collect();
        assert_eq!(names, ["space_separator", "id_start", "id_continue"]);
    }

    #[test]
    fn recipe_ranges_are_well_formed() {
        for recipe in RECIPES {
            for exclusion in recipe.exclude {
                if let Exclusion::Range(low, high) = *exclusion {
                    assert!(low <= high, "{}: {low:?}..={high:?}", recipe.name);
                }
            }
        }
    }

    #[test]
    fn builds_every_table() {
        let tables = build_tables(RECIPES, &full_source()).unwrap();

        let cps: Vec<Vec<u32>> = tables
            .iter()
            .map(|table| table.code_points.to_sorted_vec())
            .collect();

        assert_eq!(cps[0], [0x1680, 0x3000]);
        assert_eq!(
            cps[1],
            [0xAA, 0xC0, 0xDF, 0x1C5, 0x2B0, 0x5D0, 0x16EE, 0x1F600, 0x1F601]
        );
        assert_eq!(
            cps[2],
            [
                0xAA, 0xC0, 0xDF, 0x1C5, 0x2B0, 0x300, 0x5D0, 0x660, 0x903, 0x16EE, 0x203F,
                0x1F600, 0x1F601
            ]
        );
    }

    #[test]
    fn ascii_identifier_chars_excluded() {
        let tables = build_tables(RECIPES, &full_source()).unwrap();

        for table in &tables {
            for cp in forbidden_ascii() {
                assert!(!table.code_points.contains(cp), "{} has {cp:#x}", table.name);
            }
        }
    }

    #[test]
    fn id_continue_contains_id_start() {
        let tables = build_tables(RECIPES, &full_source()).unwrap();
        let id_start = &tables[1].code_points;
        let id_continue = &tables[2].code_points;

        assert!(id_start.iter().all(|cp| id_continue.contains(cp)));
    }

    #[test]
    fn uppercase_a_excluded() {
        const RECIPE: &[Recipe] = &[Recipe {
            name: "id_start",
            include: &[Input::Category("Uppercase_Letter")],
            exclude: &[Exclusion::Range('A', 'Z')],
        }];

        let source = FakeSource::new(&[(Property::GeneralCategory("Uppercase_Letter"), &[0x41])]);
        let tables = build_tables(RECIPE, &source).unwrap();

        assert!(!tables[0].code_points.contains(0x41));
        assert!(tables[0].code_points.is_empty());
    }

    #[test]
    fn only_ideographic_space_left() {
        const RECIPE: &[Recipe] = &[Recipe {
            name: "space_separator",
            include: &[Input::Category("Space_Separator")],
            exclude: &[Exclusion::Values(&[' '])],
        }];

        let source = FakeSource::new(&[(
            Property::GeneralCategory("Space_Separator"),
            &[0x20, 0x3000],
        )]);
        let tables = build_tables(RECIPE, &source).unwrap();

        assert_eq!(tables[0].code_points.to_sorted_vec(), [0x3000]);
    }

    #[test]
    fn missing_category_aborts() {
        let source = FakeSource::new(&[(Property::GeneralCategory("Space_Separator"), &[0x3000])]);

        assert!(matches!(
            build_tables(RECIPES, &source),
            Err(Error::DataSourceLoad { .. })
        ));
    }

    #[test]
    fn forward_table_reference() {
        const RECIPE: &[Recipe] = &[
            Recipe {
                name: "first",
                include: &[Input::Table("second")],
                exclude: &[],
            },
            Recipe {
                name: "second",
                include: &[],
                exclude: &[],
            },
        ];

        let result = build_tables(RECIPE, &FakeSource::new(&[]));
        assert!(matches!(result, Err(Error::UndefinedTable { name }) if name == "second"));
    }

    #[test]
    fn reversed_exclusion_range() {
        const RECIPE: &[Recipe] = &[Recipe {
            name: "broken",
            include: &[],
            exclude: &[Exclusion::Range('z', 'a')],
        }];

        assert!(matches!(
            build_tables(RECIPE, &FakeSource::new(&[])),
            Err(Error::InvalidRange { low: 'z', high: 'a' })
        ));
    }
}
