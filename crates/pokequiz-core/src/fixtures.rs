//! A small species catalog for unit tests.

use pokequiz_types::{
    Ability, AbilityId, AbilitySlots, BaseStats, EggGroup, EggGroupId, EggGroups, PokemonType,
    Species, SpeciesId, TypeId, Typing,
};
use rust_decimal::Decimal;

pub const NORMAL: i32 = 1;
pub const FIRE: i32 = 2;
pub const WATER: i32 = 3;
pub const GRASS: i32 = 4;
pub const ELECTRIC: i32 = 5;
pub const POISON: i32 = 6;
pub const GHOST: i32 = 8;
pub const ROCK: i32 = 9;
pub const GROUND: i32 = 10;
pub const FAIRY: i32 = 11;

pub const CHLOROPHYLL: i32 = 2;

fn kind(id: i32) -> PokemonType {
    let name = match id {
        NORMAL => "Normal",
        FIRE => "Fire",
        WATER => "Water",
        GRASS => "Grass",
        ELECTRIC => "Electric",
        POISON => "Poison",
        GHOST => "Ghost",
        ROCK => "Rock",
        GROUND => "Ground",
        FAIRY => "Fairy",
        _ => "Unknown",
    };
    PokemonType {
        id: TypeId(id),
        name: name.to_owned(),
    }
}

fn ability((id, name): (i32, &str)) -> Ability {
    Ability {
        id: AbilityId(id),
        name: name.to_owned(),
    }
}

fn egg((id, name): (i32, &str)) -> EggGroup {
    EggGroup {
        id: EggGroupId(id),
        name: name.to_owned(),
    }
}

struct Row<'a> {
    id: i32,
    name: &'a str,
    group: &'a str,
    weight_tenths: i64,
    stats: [i32; 6],
    types: (i32, Option<i32>),
    abilities: [Option<(i32, &'a str)>; 3],
    eggs: ((i32, &'a str), Option<(i32, &'a str)>),
}

impl Row<'_> {
    fn build(self) -> Species {
        let [hp, attack, defense, sp_atk, sp_def, speed] = self.stats;
        let mut species = Species::bare(SpeciesId(self.id), self.name);
        species.species_group = Some(self.group.to_owned());
        species.weight = Some(Decimal::new(self.weight_tenths, 1));
        species.dex_number = Some(self.id);
        species.stats = Some(BaseStats {
            hp,
            attack,
            defense,
            sp_atk,
            sp_def,
            speed,
            total: hp + attack + defense + sp_atk + sp_def + speed,
        });
        species.typing = Some(Typing {
            primary: kind(self.types.0),
            secondary: self.types.1.map(kind),
        });
        let [primary, secondary, hidden] = self.abilities;
        species.abilities = primary.map(|primary| AbilitySlots {
            primary: ability(primary),
            secondary: secondary.map(ability),
            hidden: hidden.map(ability),
        });
        species.egg_groups = Some(EggGroups {
            first: egg(self.eggs.0),
            second: self.eggs.1.map(egg),
        });
        species
    }
}

const MONSTER: (i32, &str) = (1, "Monster");
const PLANT: (i32, &str) = (2, "Grass");
const DRAGON: (i32, &str) = (3, "Dragon");
const WATER_1: (i32, &str) = (4, "Water 1");
const FIELD: (i32, &str) = (5, "Field");
const FAIRY_EGG: (i32, &str) = (6, "Fairy");
const AMORPHOUS: (i32, &str) = (7, "Amorphous");
const MINERAL: (i32, &str) = (8, "Mineral");

/// Twelve fully populated species.
///
/// Eevee, Vaporeon and Sylveon share the "Evolution Pokémon" label, and
/// Bulbasaur and Charmander share the Monster egg group.
pub fn catalog() -> Vec<Species> {
    let overgrow = Some((1, "Overgrow"));
    let chlorophyll = Some((CHLOROPHYLL, "Chlorophyll"));
    let statik = Some((7, "Static"));
    let lightning_rod = Some((8, "Lightning Rod"));

    vec![
        Row {
            id: 1,
            name: "Bulbasaur",
            group: "Seed Pokémon",
            weight_tenths: 69,
            stats: [45, 49, 49, 65, 65, 45],
            types: (GRASS, Some(POISON)),
            abilities: [overgrow, None, chlorophyll],
            eggs: (MONSTER, Some(PLANT)),
        },
        Row {
            id: 2,
            name: "Ivysaur",
            group: "Seed Pokémon",
            weight_tenths: 130,
            stats: [60, 62, 63, 80, 80, 60],
            types: (GRASS, Some(POISON)),
            abilities: [overgrow, None, chlorophyll],
            eggs: (MONSTER, Some(PLANT)),
        },
        Row {
            id: 4,
            name: "Charmander",
            group: "Lizard Pokémon",
            weight_tenths: 85,
            stats: [39, 52, 43, 60, 50, 65],
            types: (FIRE, None),
            abilities: [Some((3, "Blaze")), None, Some((4, "Solar Power"))],
            eggs: (MONSTER, Some(DRAGON)),
        },
        Row {
            id: 7,
            name: "Squirtle",
            group: "Tiny Turtle Pokémon",
            weight_tenths: 90,
            stats: [44, 48, 65, 50, 64, 43],
            types: (WATER, None),
            abilities: [Some((5, "Torrent")), None, Some((6, "Rain Dish"))],
            eggs: (MONSTER, Some(WATER_1)),
        },
        Row {
            id: 25,
            name: "Pikachu",
            group: "Mouse Pokémon",
            weight_tenths: 60,
            stats: [35, 55, 40, 50, 50, 90],
            types: (ELECTRIC, None),
            abilities: [statik, None, lightning_rod],
            eggs: (FIELD, Some(FAIRY_EGG)),
        },
        Row {
            id: 26,
            name: "Raichu",
            group: "Mouse Pokémon",
            weight_tenths: 300,
            stats: [60, 90, 55, 90, 80, 110],
            types: (ELECTRIC, None),
            abilities: [statik, None, lightning_rod],
            eggs: (FIELD, Some(FAIRY_EGG)),
        },
        Row {
            id: 94,
            name: "Gengar",
            group: "Shadow Pokémon",
            weight_tenths: 405,
            stats: [60, 65, 60, 130, 75, 110],
            types: (GHOST, Some(POISON)),
            abilities: [Some((19, "Cursed Body")), None, None],
            eggs: (AMORPHOUS, None),
        },
        Row {
            id: 95,
            name: "Onix",
            group: "Rock Snake Pokémon",
            weight_tenths: 2100,
            stats: [35, 45, 160, 30, 45, 70],
            types: (ROCK, Some(GROUND)),
            abilities: [
                Some((20, "Rock Head")),
                Some((21, "Sturdy")),
                Some((22, "Weak Armor")),
            ],
            eggs: (MINERAL, None),
        },
        Row {
            id: 133,
            name: "Eevee",
            group: "Evolution Pokémon",
            weight_tenths: 65,
            stats: [55, 55, 50, 45, 65, 55],
            types: (NORMAL, None),
            abilities: [
                Some((9, "Run Away")),
                Some((10, "Adaptability")),
                Some((11, "Anticipation")),
            ],
            eggs: (FIELD, None),
        },
        Row {
            id: 134,
            name: "Vaporeon",
            group: "Evolution Pokémon",
            weight_tenths: 290,
            stats: [130, 65, 60, 110, 95, 65],
            types: (WATER, None),
            abilities: [Some((12, "Water Absorb")), None, Some((13, "Hydration"))],
            eggs: (FIELD, None),
        },
        Row {
            id: 143,
            name: "Snorlax",
            group: "Sleeping Pokémon",
            weight_tenths: 4600,
            stats: [160, 110, 65, 65, 110, 30],
            types: (NORMAL, None),
            abilities: [
                Some((16, "Immunity")),
                Some((17, "Thick Fat")),
                Some((18, "Gluttony")),
            ],
            eggs: (MONSTER, None),
        },
        Row {
            id: 700,
            name: "Sylveon",
            group: "Evolution Pokémon",
            weight_tenths: 235,
            stats: [95, 65, 65, 110, 130, 60],
            types: (FAIRY, None),
            abilities: [Some((14, "Cute Charm")), None, Some((15, "Pixilate"))],
            eggs: (FIELD, None),
        },
    ]
    .into_iter()
    .map(Row::build)
    .collect()
}
