//! ComboRuntime: per-entity прогресс цепочки.
//!
//! Публичная часть (`active_combo`, `step`, `combo_animation`, `is_complete`)
//! описывает играющий шаг и живёт до завершения его клипа. Трекер
//! (`chain`, `next_step`, `since_last_input`, `pending`) живёт дольше:
//! между клипами, пока не истечёт окно.

use bevy::prelude::*;

use crate::combo::{ComboCatalog, ComboChain, EXPIRY_MULTIPLIER};
use crate::components::{ActionTrigger, InputSnapshot, WeaponCategory};

/// Шаг, который начал играть (или встал в очередь)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboProgress {
    pub combo_id: String,
    /// 1-based
    pub step: u32,
    pub animation: String,
    pub queued: bool,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ComboRuntime {
    pub active_combo: Option<String>,
    /// 1-based номер играющего шага (0 = нет)
    pub step: u32,
    pub combo_animation: Option<String>,
    /// Играет последний шаг цепочки
    pub is_complete: bool,

    /// Цепочка, продолжение которой ждём
    pub chain: Option<String>,
    /// Индекс шага, который ждём следующим
    pub next_step: usize,
    pub since_last_input: f32,
    /// Продолжение, принятое во время клипа: (chain id, step index)
    pub pending: Option<(String, usize)>,
}

impl ComboRuntime {
    pub fn is_active(&self) -> bool {
        self.active_combo.is_some()
    }

    pub fn reset_tracker(&mut self) {
        self.chain = None;
        self.next_step = 0;
        self.since_last_input = 0.0;
        self.pending = None;
    }

    fn begin_step(&mut self, chain: &ComboChain, index: usize) -> Option<ComboProgress> {
        let step = chain.step(index)?;

        self.active_combo = Some(chain.id.clone());
        self.step = index as u32 + 1;
        self.combo_animation = Some(step.animation.clone());
        self.is_complete = index + 1 == chain.steps.len();

        Some(ComboProgress {
            combo_id: chain.id.clone(),
            step: self.step,
            animation: step.animation.clone(),
            queued: false,
        })
    }

    /// Один тик трекера.
    ///
    /// `trigger`: уже выбранный (по precedence) input этого кадра или None.
    pub fn process_input(
        &mut self,
        trigger: Option<ActionTrigger>,
        weapon: Option<WeaponCategory>,
        catalog: &ComboCatalog,
        delta: f32,
    ) -> Option<ComboProgress> {
        self.since_last_input += delta;
        self.expire_if_stale(catalog);

        let trigger = trigger?;

        // Полностью принятая цепочка всё ещё "наша", пока её шаг ждёт в очереди
        let tracked = self
            .chain
            .clone()
            .or_else(|| self.pending.as_ref().map(|(id, _)| id.clone()));

        if let Some(chain) = tracked.as_deref().and_then(|id| catalog.get(id)) {
            let within_window = chain.step(self.next_step).is_some_and(|step| {
                step.trigger == trigger && self.since_last_input <= step.window_secs
            });

            if within_window {
                return self.advance(chain);
            }

            // Чужой input или опоздали. Некэнсельное комбо доигрывает клип.
            if self.is_active() && !chain.cancelable {
                return None;
            }
            self.reset_tracker();
        }

        // Новую цепочку поверх играющего клипа не начинаем
        if self.is_active() {
            return None;
        }

        let chain = catalog.find_starter(trigger, weapon)?;
        self.chain = (chain.steps.len() > 1).then(|| chain.id.clone());
        self.next_step = 1;
        self.since_last_input = 0.0;
        self.pending = None;

        self.begin_step(chain, 0)
    }

    fn advance(&mut self, chain: &ComboChain) -> Option<ComboProgress> {
        // Одно продолжение в очереди максимум
        if self.pending.is_some() {
            return None;
        }

        let index = self.next_step;
        self.next_step += 1;
        self.since_last_input = 0.0;

        // Последний шаг принят: трекер больше ничего не ждёт
        if self.next_step >= chain.steps.len() {
            self.chain = None;
        }

        if self.is_active() {
            self.pending = Some((chain.id.clone(), index));
            let step = chain.step(index)?;
            return Some(ComboProgress {
                combo_id: chain.id.clone(),
                step: index as u32 + 1,
                animation: step.animation.clone(),
                queued: true,
            });
        }

        self.begin_step(chain, index)
    }

    fn expire_if_stale(&mut self, catalog: &ComboCatalog) {
        if self.is_active() || self.pending.is_some() {
            return;
        }

        let Some(chain) = self.chain.as_deref().and_then(|id| catalog.get(id)) else {
            // Цепочка пропала из каталога
            if self.chain.is_some() {
                self.reset_tracker();
            }
            return;
        };

        let window = chain
            .step(self.next_step)
            .or_else(|| chain.steps.last())
            .map_or(0.0, |step| step.window_secs);

        if self.since_last_input > window * EXPIRY_MULTIPLIER {
            self.reset_tracker();
        }
    }

    /// Клип текущего шага завершился.
    ///
    /// Есть принятое продолжение → оно начинает играть. Иначе комбо снимается
    /// (трекер остаётся до истечения окна).
    pub fn finish_step(&mut self, catalog: &ComboCatalog) -> Option<ComboProgress> {
        if let Some((chain_id, index)) = self.pending.take() {
            if let Some(chain) = catalog.get(&chain_id) {
                return self.begin_step(chain, index);
            }
        }

        self.active_combo = None;
        self.step = 0;
        self.combo_animation = None;
        self.is_complete = false;
        None
    }
}

/// Input комбо этого кадра: heavy > charged > special > attack (только свежие нажатия)
pub fn combo_trigger(input: &InputSnapshot) -> Option<ActionTrigger> {
    ActionTrigger::COMBO_PRECEDENCE
        .into_iter()
        .find(|trigger| input.was_pressed(*trigger))
}
