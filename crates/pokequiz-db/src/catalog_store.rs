//! Reads from the reference catalog.
//!
//! A species and everything the quiz modes draw on are spread over five
//! tables. [`CatalogStore::sample`] joins them into one [`SpeciesRow`] per
//! species, filters by the mode's eligibility predicate and lets
//! `PostgreSQL` pick the random rows.

use pokequiz_core::store::{Eligibility, SolutionCriterion};
use pokequiz_types::{
    Ability, AbilityId, AbilitySlots, BaseStats, EggGroup, EggGroupId, EggGroups, PokemonType,
    Species, SpeciesId, SpeciesRef, TypeId, Typing,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DbError;

const SPECIES_SELECT: &str = r"
SELECT
    p.pokemon_id, p.name, p.species, p.weight, p.dex_number,
    ps.hp, ps.attack, ps.defense, ps.sp_atk, ps.sp_def, ps.speed, ps.total,
    pt.slot1_type, t1.type_name AS type1_name,
    pt.slot2_type, t2.type_name AS type2_name,
    pa.ability1_id, a1.ability_name AS ability1_name,
    pa.ability2_id, a2.ability_name AS ability2_name,
    pa.hidden_ability_id, ah.ability_name AS hidden_ability_name,
    peg.egg_group1_id, e1.egg_group_name AS egg_group1_name,
    peg.egg_group2_id, e2.egg_group_name AS egg_group2_name
FROM pokemon p
LEFT JOIN pokemon_stats ps ON ps.pokemon_id = p.pokemon_id
LEFT JOIN pokemon_types pt ON pt.pokemon_id = p.pokemon_id
LEFT JOIN types t1 ON t1.type_id = pt.slot1_type
LEFT JOIN types t2 ON t2.type_id = pt.slot2_type
LEFT JOIN pokemon_abilities pa ON pa.pokemon_id = p.pokemon_id
LEFT JOIN abilities a1 ON a1.ability_id = pa.ability1_id
LEFT JOIN abilities a2 ON a2.ability_id = pa.ability2_id
LEFT JOIN abilities ah ON ah.ability_id = pa.hidden_ability_id
LEFT JOIN pokemon_egg_groups peg ON peg.pokemon_id = p.pokemon_id
LEFT JOIN egg_groups e1 ON e1.egg_group_id = peg.egg_group1_id
LEFT JOIN egg_groups e2 ON e2.egg_group_id = peg.egg_group2_id";

/// SQL predicate equivalent to [`Eligibility::admits`].
pub const fn eligibility_filter(eligibility: Eligibility) -> &'static str {
    match eligibility {
        Eligibility::HasWeight => "p.weight IS NOT NULL",
        Eligibility::HasStats => "ps.pokemon_id IS NOT NULL",
        Eligibility::HasSpeciesGroup => "p.species IS NOT NULL AND TRIM(p.species) <> ''",
        Eligibility::HasEggGroups => "peg.pokemon_id IS NOT NULL",
        Eligibility::HasDexNumber => "p.dex_number IS NOT NULL",
        Eligibility::HasAbilities => "pa.pokemon_id IS NOT NULL",
        Eligibility::HasTyping => "pt.pokemon_id IS NOT NULL",
    }
}

/// One species joined with all of its reference data.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpeciesRow {
    /// Species id.
    pub pokemon_id: i32,
    /// Display name.
    pub name: String,
    /// Species-group label.
    pub species: Option<String>,
    /// Weight in kilograms.
    pub weight: Option<Decimal>,
    /// Dex number.
    pub dex_number: Option<i32>,
    /// Base HP.
    pub hp: Option<i32>,
    /// Base attack.
    pub attack: Option<i32>,
    /// Base defense.
    pub defense: Option<i32>,
    /// Base special attack.
    pub sp_atk: Option<i32>,
    /// Base special defense.
    pub sp_def: Option<i32>,
    /// Base speed.
    pub speed: Option<i32>,
    /// Stat total.
    pub total: Option<i32>,
    /// First type id.
    pub slot1_type: Option<i32>,
    /// First type name.
    pub type1_name: Option<String>,
    /// Second type id.
    pub slot2_type: Option<i32>,
    /// Second type name.
    pub type2_name: Option<String>,
    /// Primary ability id.
    pub ability1_id: Option<i32>,
    /// Primary ability name.
    pub ability1_name: Option<String>,
    /// Secondary ability id.
    pub ability2_id: Option<i32>,
    /// Secondary ability name.
    pub ability2_name: Option<String>,
    /// Hidden ability id.
    pub hidden_ability_id: Option<i32>,
    /// Hidden ability name.
    pub hidden_ability_name: Option<String>,
    /// First egg group id.
    pub egg_group1_id: Option<i32>,
    /// First egg group name.
    pub egg_group1_name: Option<String>,
    /// Second egg group id.
    pub egg_group2_id: Option<i32>,
    /// Second egg group name.
    pub egg_group2_name: Option<String>,
}

fn pokemon_type(id: Option<i32>, name: Option<String>) -> Option<PokemonType> {
    Some(PokemonType {
        id: TypeId(id?),
        name: name?,
    })
}

fn ability(id: Option<i32>, name: Option<String>) -> Option<Ability> {
    Some(Ability {
        id: AbilityId(id?),
        name: name?,
    })
}

fn egg_group(id: Option<i32>, name: Option<String>) -> Option<EggGroup> {
    Some(EggGroup {
        id: EggGroupId(id?),
        name: name?,
    })
}

impl SpeciesRow {
    fn stats(&self) -> Option<BaseStats> {
        Some(BaseStats {
            hp: self.hp?,
            attack: self.attack?,
            defense: self.defense?,
            sp_atk: self.sp_atk?,
            sp_def: self.sp_def?,
            speed: self.speed?,
            total: self.total?,
        })
    }

    /// Convert into the engine's species record.
    pub fn into_species(self) -> Species {
        let stats = self.stats();
        let typing = pokemon_type(self.slot1_type, self.type1_name).map(|primary| Typing {
            primary,
            secondary: pokemon_type(self.slot2_type, self.type2_name),
        });
        let abilities = ability(self.ability1_id, self.ability1_name).map(|primary| AbilitySlots {
            primary,
            secondary: ability(self.ability2_id, self.ability2_name),
            hidden: ability(self.hidden_ability_id, self.hidden_ability_name),
        });
        let egg_groups =
            egg_group(self.egg_group1_id, self.egg_group1_name).map(|first| EggGroups {
                first,
                second: egg_group(self.egg_group2_id, self.egg_group2_name),
            });

        Species {
            id: SpeciesId(self.pokemon_id),
            name: self.name,
            species_group: self.species,
            weight: self.weight,
            dex_number: self.dex_number,
            stats,
            typing,
            abilities,
            egg_groups,
        }
    }
}

/// The id/name projection of a species.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpeciesRefRow {
    /// Species id.
    pub pokemon_id: i32,
    /// Display name.
    pub name: String,
}

impl From<SpeciesRefRow> for SpeciesRef {
    fn from(row: SpeciesRefRow) -> Self {
        Self::new(SpeciesId(row.pokemon_id), row.name)
    }
}

/// Read operations on the reference catalog.
pub struct CatalogStore<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogStore<'a> {
    /// Create a new catalog store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Draw up to `count` distinct random species satisfying `eligibility`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn sample(
        &self,
        eligibility: Eligibility,
        count: usize,
    ) -> Result<Vec<Species>, DbError> {
        let limit = i64::try_from(count).unwrap_or(i64::MAX);
        let sql = format!(
            "{SPECIES_SELECT}\nWHERE {}\nORDER BY RANDOM()\nLIMIT $1",
            eligibility_filter(eligibility)
        );
        let rows = sqlx::query_as::<_, SpeciesRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(SpeciesRow::into_species).collect())
    }

    /// Load one fully joined species by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn species(&self, id: SpeciesId) -> Result<Option<Species>, DbError> {
        let sql = format!("{SPECIES_SELECT}\nWHERE p.pokemon_id = $1");
        let row = sqlx::query_as::<_, SpeciesRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(SpeciesRow::into_species))
    }

    /// Look a species up by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<SpeciesRef>, DbError> {
        let row = sqlx::query_as::<_, SpeciesRefRow>(
            r"SELECT pokemon_id, name
              FROM pokemon
              WHERE LOWER(name) = LOWER($1)
              LIMIT 1",
        )
        .bind(name.trim())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(SpeciesRef::from))
    }

    /// Every species satisfying `criterion`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn solution_set(
        &self,
        criterion: &SolutionCriterion,
    ) -> Result<Vec<SpeciesRef>, DbError> {
        let rows = match criterion {
            SolutionCriterion::SpeciesGroup(label) => {
                sqlx::query_as::<_, SpeciesRefRow>(
                    r"SELECT pokemon_id, name
                      FROM pokemon
                      WHERE LOWER(TRIM(species)) = LOWER(TRIM($1))
                      ORDER BY pokemon_id",
                )
                .bind(label.as_str())
                .fetch_all(self.pool)
                .await?
            }
            SolutionCriterion::Ability(ability) => {
                sqlx::query_as::<_, SpeciesRefRow>(
                    r"SELECT p.pokemon_id, p.name
                      FROM pokemon p
                      JOIN pokemon_abilities pa ON pa.pokemon_id = p.pokemon_id
                      WHERE $1 IN (pa.ability1_id, pa.ability2_id, pa.hidden_ability_id)
                      ORDER BY p.pokemon_id",
                )
                .bind(ability.into_inner())
                .fetch_all(self.pool)
                .await?
            }
            SolutionCriterion::Typing {
                primary,
                secondary: Some(secondary),
            } => {
                sqlx::query_as::<_, SpeciesRefRow>(
                    r"SELECT p.pokemon_id, p.name
                      FROM pokemon p
                      JOIN pokemon_types pt ON pt.pokemon_id = p.pokemon_id
                      WHERE (pt.slot1_type = $1 AND pt.slot2_type = $2)
                         OR (pt.slot1_type = $2 AND pt.slot2_type = $1)
                      ORDER BY p.pokemon_id",
                )
                .bind(primary.into_inner())
                .bind(secondary.into_inner())
                .fetch_all(self.pool)
                .await?
            }
            SolutionCriterion::Typing {
                primary,
                secondary: None,
            } => {
                sqlx::query_as::<_, SpeciesRefRow>(
                    r"SELECT p.pokemon_id, p.name
                      FROM pokemon p
                      JOIN pokemon_types pt ON pt.pokemon_id = p.pokemon_id
                      WHERE pt.slot1_type = $1 OR pt.slot2_type = $1
                      ORDER BY p.pokemon_id",
                )
                .bind(primary.into_inner())
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(SpeciesRef::from).collect())
    }
}
