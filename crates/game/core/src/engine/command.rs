//! Player commands and their transitions.

use tracing::debug;

use crate::ability::AbilityTemplate;
use crate::card::{CardInstance, CardTemplate};
use crate::effect::EffectKind;
use crate::env::GameEnv;
use crate::event::Event;
use crate::state::{AbilityId, BattleState, CardInstanceId, EntityId, Phase};

use super::errors::{CommandError, ContentError, ValidationError};
use super::resolve::{declare_intents, push_energy, refresh_passives, resolve_effects};
use super::setup::advance_floor;
use super::targeting::{self, Reach, TargetRef};
use super::transition::CommandTransition;
use super::turns::end_player_turn;

/// Everything the player can ask the engine to do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    SelectCard(SelectCard),
    PlayCard(PlayCard),
    UseAbility(UseAbility),
    ReverseCard(ReverseCard),
    EndTurn(EndTurn),
    AdvanceFloor(AdvanceFloor),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectCard(_) => "select_card",
            Self::PlayCard(_) => "play_card",
            Self::UseAbility(_) => "use_ability",
            Self::ReverseCard(_) => "reverse_card",
            Self::EndTurn(_) => "end_turn",
            Self::AdvanceFloor(_) => "advance_floor",
        }
    }
}

/// Marks a hand card as selected for the targeting queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectCard {
    pub card: CardInstanceId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayCard {
    pub card: CardInstanceId,
    pub target: Option<TargetRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseAbility {
    pub ability: AbilityId,
    pub target: Option<TargetRef>,
}

/// Flips a hand card between its upright and reversed effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReverseCard {
    pub card: CardInstanceId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurn;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceFloor;

fn ensure_player_turn(state: &BattleState) -> Result<(), ValidationError> {
    match state.turn.phase {
        Phase::PlayerTurn => Ok(()),
        Phase::EnemyTurn => Err(ValidationError::NotPlayerTurn {
            phase: Phase::EnemyTurn,
        }),
        phase => Err(ValidationError::BattleOver { phase }),
    }
}

/// A stunned player may still end the turn, but not act.
fn ensure_not_stunned(state: &BattleState) -> Result<(), ValidationError> {
    if state.player.unit.effects.has(EffectKind::Stun) {
        return Err(ValidationError::Stunned);
    }
    Ok(())
}

/// A hand card and its catalog template.
pub(crate) fn card_in_hand<'e>(
    state: &BattleState,
    env: &GameEnv<'e>,
    id: CardInstanceId,
) -> Result<(CardInstance, &'e CardTemplate), CommandError> {
    let instance = state
        .player
        .piles
        .in_hand(id)
        .cloned()
        .ok_or(ValidationError::CardNotInHand(id))?;
    let template = env
        .cards()?
        .card(&instance.card)
        .ok_or_else(|| ContentError::UnknownCard(instance.card.clone()))?;
    Ok((instance, template))
}

fn card_reach(state: &BattleState, instance: &CardInstance, template: &CardTemplate) -> Reach {
    Reach::of(
        state,
        EntityId::PLAYER,
        template.effects_for(instance.orientation),
        template.range,
    )
}

fn ensure_energy(state: &BattleState, cost: u32) -> Result<(), ValidationError> {
    let available = state.player.energy.current;
    if available < cost {
        return Err(ValidationError::InsufficientEnergy {
            required: cost,
            available,
        });
    }
    Ok(())
}

impl CommandTransition for SelectCard {
    fn pre_validate(&self, state: &BattleState, env: &GameEnv<'_>) -> Result<(), CommandError> {
        ensure_player_turn(state)?;
        card_in_hand(state, env, self.card)?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _env: &GameEnv<'_>,
        _events: &mut Vec<Event>,
    ) -> Result<(), CommandError> {
        state.selection = Some(self.card);
        Ok(())
    }
}

impl CommandTransition for PlayCard {
    fn pre_validate(&self, state: &BattleState, env: &GameEnv<'_>) -> Result<(), CommandError> {
        ensure_player_turn(state)?;
        ensure_not_stunned(state)?;
        let (instance, template) = card_in_hand(state, env, self.card)?;
        ensure_energy(state, template.cost)?;
        targeting::resolve(
            state,
            EntityId::PLAYER,
            card_reach(state, &instance, template),
            self.target,
        )?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &GameEnv<'_>,
        events: &mut Vec<Event>,
    ) -> Result<(), CommandError> {
        let (instance, template) = card_in_hand(state, env, self.card)?;
        let target = targeting::resolve(
            state,
            EntityId::PLAYER,
            card_reach(state, &instance, template),
            self.target,
        )?;

        state
            .player
            .spend_energy(template.cost)
            .map_err(|available| ValidationError::InsufficientEnergy {
                required: template.cost,
                available,
            })?;
        let played = state
            .player
            .piles
            .play(self.card)
            .map_err(|_| ValidationError::CardNotInHand(self.card))?;
        if state.selection == Some(self.card) {
            state.selection = None;
        }

        debug!(card = %played.card, orientation = %played.orientation, "card played");
        events.push(Event::CardPlayed {
            card: played.id,
            template: played.card.clone(),
            orientation: played.orientation,
        });
        push_energy(state, events);
        refresh_passives(state, events);

        resolve_effects(
            state,
            env,
            EntityId::PLAYER,
            template.effects_for(played.orientation),
            target,
            events,
        )?;
        declare_intents(state, env, events);
        Ok(())
    }
}

/// The player's copy of an owned, invokable ability.
fn owned_active(
    state: &BattleState,
    env: &GameEnv<'_>,
    id: &AbilityId,
) -> Result<AbilityTemplate, CommandError> {
    let Some(ability) = state.player.unit.ability(id) else {
        // Distinguish a typo in content from an ability the player lacks.
        return Err(match env.abilities()?.ability(id) {
            Some(_) => ValidationError::AbilityNotOwned(id.clone()).into(),
            None => ContentError::UnknownAbility(id.clone()).into(),
        });
    };
    if ability.is_passive() {
        return Err(ValidationError::PassiveNotInvokable(id.clone()).into());
    }
    if !ability.is_ready() {
        return Err(ValidationError::OnCooldown {
            ability: id.clone(),
            remaining: ability.cooldown_remaining,
        }
        .into());
    }
    Ok(ability.template.clone())
}

impl CommandTransition for UseAbility {
    fn pre_validate(&self, state: &BattleState, env: &GameEnv<'_>) -> Result<(), CommandError> {
        ensure_player_turn(state)?;
        ensure_not_stunned(state)?;
        let template = owned_active(state, env, &self.ability)?;
        ensure_energy(state, template.cost)?;
        let reach = Reach::of(state, EntityId::PLAYER, &template.effects, template.range);
        targeting::resolve(state, EntityId::PLAYER, reach, self.target)?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &GameEnv<'_>,
        events: &mut Vec<Event>,
    ) -> Result<(), CommandError> {
        let template = owned_active(state, env, &self.ability)?;
        let reach = Reach::of(state, EntityId::PLAYER, &template.effects, template.range);
        let target = targeting::resolve(state, EntityId::PLAYER, reach, self.target)?;

        state
            .player
            .spend_energy(template.cost)
            .map_err(|available| ValidationError::InsufficientEnergy {
                required: template.cost,
                available,
            })?;
        if let Some(ability) = state.player.unit.ability_mut(&self.ability) {
            ability.start_cooldown();
        }

        debug!(ability = %self.ability, cooldown = template.cooldown, "ability used");
        events.push(Event::AbilityUsed {
            entity: EntityId::PLAYER,
            ability: self.ability.clone(),
        });
        push_energy(state, events);
        refresh_passives(state, events);

        resolve_effects(
            state,
            env,
            EntityId::PLAYER,
            &template.effects,
            target,
            events,
        )?;
        declare_intents(state, env, events);
        Ok(())
    }
}

impl CommandTransition for ReverseCard {
    fn pre_validate(&self, state: &BattleState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        ensure_player_turn(state)?;
        if state.player.piles.in_hand(self.card).is_none() {
            return Err(ValidationError::CardNotInHand(self.card).into());
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &GameEnv<'_>,
        events: &mut Vec<Event>,
    ) -> Result<(), CommandError> {
        let orientation = state
            .player
            .piles
            .reverse(self.card)
            .map_err(|_| ValidationError::CardNotInHand(self.card))?;
        events.push(Event::CardReversed {
            card: self.card,
            orientation,
        });
        declare_intents(state, env, events);
        Ok(())
    }
}

impl CommandTransition for EndTurn {
    fn pre_validate(&self, state: &BattleState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        ensure_player_turn(state)?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &GameEnv<'_>,
        events: &mut Vec<Event>,
    ) -> Result<(), CommandError> {
        end_player_turn(state, env, events);
        Ok(())
    }
}

impl CommandTransition for AdvanceFloor {
    fn pre_validate(&self, state: &BattleState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        match state.turn.phase {
            Phase::Victory => Ok(()),
            phase @ (Phase::Defeat | Phase::Cleared) => {
                Err(ValidationError::BattleOver { phase }.into())
            }
            phase => Err(ValidationError::NotCleared { phase }.into()),
        }
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &GameEnv<'_>,
        events: &mut Vec<Event>,
    ) -> Result<(), CommandError> {
        advance_floor(state, env, events)?;
        Ok(())
    }
}

