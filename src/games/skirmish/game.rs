//! Skirmish game implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardDefinition, CardInstance, CardKeywords, CardRegistry, CardType, TargetKind};
use crate::core::{DeckError, DeckbuilderConfig, EntityAllocator, EntityId, GameRng, PlayError};
use crate::deck::{DeckDefinition, DeckInstance};
use crate::rules::{check_basic_play, DeckRules};
use crate::template::{DeckbuilderCore, DeckbuilderTemplate};

/// The training enemy, as a play target.
pub const ENEMY: EntityId = EntityId(0);
/// The player, as a play target.
pub const PLAYER: EntityId = EntityId(1);

/// Card instance ids start here, clear of the combatant ids.
const CARD_ID_BASE: u32 = 100;

pub const STRIKE: &str = "strike";
pub const DEFEND: &str = "defend";
pub const BASH: &str = "bash";
pub const OFFERING: &str = "offering";
pub const WOUND: &str = "wound";
pub const DAZED: &str = "dazed";
pub const GUARD: &str = "guard";

/// Starting deck, as `(key, count)`.
pub const STARTER_DECK: &[(&str, u32)] = &[(STRIKE, 5), (DEFEND, 4), (BASH, 1)];

/// Register every skirmish card.
pub fn starter_registry() -> Result<CardRegistry, DeckError> {
    let mut registry = CardRegistry::new();

    registry.register_auto(|id| {
        CardDefinition::new(id, STRIKE, "Strike")
            .with_cost(1)
            .with_target(TargetKind::SingleEnemy)
            .with_value("damage", 6)
    })?;
    registry.register_auto(|id| {
        CardDefinition::new(id, DEFEND, "Defend")
            .with_type(CardType::Skill)
            .with_cost(1)
            .with_target(TargetKind::Caster)
            .with_value("block", 5)
    })?;
    registry.register_auto(|id| {
        CardDefinition::new(id, BASH, "Bash")
            .with_cost(2)
            .with_target(TargetKind::SingleEnemy)
            .with_value("damage", 8)
            .with_value("vulnerable", 2)
    })?;
    registry.register_auto(|id| {
        CardDefinition::new(id, OFFERING, "Offering")
            .with_type(CardType::Skill)
            .with_keywords(CardKeywords::EXHAUST)
            .with_value("energy", 2)
            .with_value("draw", 2)
    })?;
    registry.register_auto(|id| {
        CardDefinition::new(id, WOUND, "Wound")
            .with_type(CardType::Status)
            .with_keywords(CardKeywords::UNPLAYABLE)
    })?;
    registry.register_auto(|id| {
        CardDefinition::new(id, DAZED, "Dazed")
            .with_type(CardType::Status)
            .with_keywords(CardKeywords::UNPLAYABLE | CardKeywords::ETHEREAL)
    })?;
    registry.register_auto(|id| {
        CardDefinition::new(id, GUARD, "Guard")
            .with_type(CardType::Skill)
            .with_cost(1)
            .with_keywords(CardKeywords::RETAIN)
            .with_target(TargetKind::Caster)
            .with_value("block", 4)
    })?;

    Ok(registry)
}

/// Health, block and debuffs of one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub hp: i64,
    pub max_hp: i64,
    pub block: i64,
    /// Turns of vulnerable remaining.
    pub vulnerable: u32,
}

impl Combatant {
    pub fn new(max_hp: i64) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            block: 0,
            vulnerable: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Apply attack damage. Block absorbs first. Returns hp lost.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let amount = if self.vulnerable > 0 {
            amount * 3 / 2
        } else {
            amount
        };
        let absorbed = amount.min(self.block);
        self.block -= absorbed;

        let lost = (amount - absorbed).min(self.hp);
        self.hp -= lost;
        lost
    }
}

/// Rules for a skirmish.
#[derive(Clone, Debug)]
pub struct SkirmishRules {
    deck: DeckDefinition,
    pub player: Combatant,
    pub enemy: Combatant,
    /// Damage the enemy deals each of its turns.
    pub enemy_attack: i64,
}

impl SkirmishRules {
    pub fn new(deck: DeckDefinition, player_hp: i64, enemy_hp: i64, enemy_attack: i64) -> Self {
        Self {
            deck,
            player: Combatant::new(player_hp),
            enemy: Combatant::new(enemy_hp),
            enemy_attack,
        }
    }

    /// Resolve the enemy's turn: it attacks, then both sides' block and
    /// the enemy's vulnerable wear off. Returns the player's hp lost.
    pub fn resolve_enemy_turn(&mut self) -> i64 {
        if !self.enemy.is_alive() {
            return 0;
        }

        let lost = self.player.take_damage(self.enemy_attack);
        self.player.block = 0;
        self.enemy.block = 0;
        self.enemy.vulnerable = self.enemy.vulnerable.saturating_sub(1);
        debug!(lost, player_hp = self.player.hp, "enemy turn resolved");
        lost
    }

    pub fn is_won(&self) -> bool {
        !self.enemy.is_alive()
    }

    pub fn is_lost(&self) -> bool {
        !self.player.is_alive()
    }
}

impl DeckRules for SkirmishRules {
    fn create_deck_def(&mut self, _registry: &CardRegistry) -> Option<DeckDefinition> {
        Some(self.deck.clone())
    }

    fn create_deck_instance(
        &mut self,
        def: &DeckDefinition,
        registry: Arc<CardRegistry>,
        rng: GameRng,
    ) -> Result<DeckInstance, DeckError> {
        DeckInstance::from_definition_with_ids(def, registry, rng, EntityAllocator::starting_at(CARD_ID_BASE))
    }

    /// Attacks are refused once the enemy is dead.
    fn check_play(
        &self,
        core: &DeckbuilderCore,
        card: &CardInstance,
        _target: Option<EntityId>,
    ) -> Result<(), PlayError> {
        check_basic_play(self, core, card)?;
        let attacks = core
            .registry()
            .get(card.card_id)
            .is_some_and(|def| def.target.requires_target());
        if attacks && !self.enemy.is_alive() {
            return Err(PlayError::Rejected(card.entity_id));
        }
        Ok(())
    }

    fn apply_card_effect(
        &mut self,
        core: &mut DeckbuilderCore,
        card: EntityId,
        target: Option<EntityId>,
    ) -> bool {
        let Some(def) = core.card_definition(card) else {
            return false;
        };
        if def.target.requires_target() && target != Some(ENEMY) {
            debug!(%card, ?target, "attack needs the enemy as target");
            return false;
        }

        let damage = def.value("damage", 0);
        let block = def.value("block", 0);
        let vulnerable = def.value("vulnerable", 0);
        let energy = def.value("energy", 0);
        let draw = def.value("draw", 0);

        if damage > 0 {
            let lost = self.enemy.take_damage(damage);
            debug!(%card, damage, lost, enemy_hp = self.enemy.hp, "enemy hit");
        }
        if block > 0 {
            self.player.block += block;
        }
        if vulnerable > 0 {
            self.enemy.vulnerable += u32::try_from(vulnerable).unwrap_or(0);
        }
        if energy > 0 {
            core.gain_energy(u32::try_from(energy).unwrap_or(0));
        }
        if draw > 0 {
            core.draw_cards(usize::try_from(draw).unwrap_or(0));
        }
        true
    }
}

/// Builder for a skirmish template.
pub struct SkirmishBuilder {
    seed: u64,
    max_energy: u32,
    hand_size: usize,
    player_hp: i64,
    enemy_hp: i64,
    enemy_attack: i64,
}

impl Default for SkirmishBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            max_energy: 3,
            hand_size: 5,
            player_hp: 80,
            enemy_hp: 40,
            enemy_attack: 7,
        }
    }
}

impl SkirmishBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn max_energy(mut self, energy: u32) -> Self {
        self.max_energy = energy;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    pub fn player_hp(mut self, hp: i64) -> Self {
        self.player_hp = hp;
        self
    }

    pub fn enemy_hp(mut self, hp: i64) -> Self {
        self.enemy_hp = hp;
        self
    }

    pub fn enemy_attack(mut self, damage: i64) -> Self {
        self.enemy_attack = damage;
        self
    }

    /// Build the template with the starter deck.
    pub fn build(self) -> Result<DeckbuilderTemplate<SkirmishRules>, DeckError> {
        let registry = starter_registry()?;
        let deck = DeckDefinition::from_keys("starter", STARTER_DECK, &registry)?;

        let config = DeckbuilderConfig::new()
            .with_seed(self.seed)
            .with_max_energy(self.max_energy)
            .with_base_hand_size(self.hand_size);
        let rules = SkirmishRules::new(deck, self.player_hp, self.enemy_hp, self.enemy_attack);

        DeckbuilderTemplate::new(config, Arc::new(registry), rules)
    }
}
