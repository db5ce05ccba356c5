//! Сенсоры бойца: ground / melee / sight зоны перекрытия
//!
//! Host (Godot Area2D или headless тест) сообщает о входе/выходе тел через
//! `SensorEvent`. ECS держит актуальный список перекрытий в `SensorContacts`,
//! чтобы атака и AI могли спросить "кто сейчас в зоне" без engine-запросов.

use bevy::prelude::*;

/// Тип сенсора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SensorKind {
    /// Зона под ногами (AI: край платформы / препятствие)
    Ground,
    /// Зона удара перед персонажем
    Melee,
    /// Зона обзора (AI)
    Sight,
}

/// Непрозрачный handle сенсора в host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct SensorHandle(pub u64);

/// Какие сенсоры реально подключены у бойца
///
/// Отсутствующий сенсор = вся логика, завязанная на него, тихо пропускается.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Sensors {
    pub ground: Option<SensorHandle>,
    pub melee: Option<SensorHandle>,
    pub sight: Option<SensorHandle>,
}

impl Sensors {
    pub fn with_ground(mut self, handle: SensorHandle) -> Self {
        self.ground = Some(handle);
        self
    }

    pub fn with_melee(mut self, handle: SensorHandle) -> Self {
        self.melee = Some(handle);
        self
    }

    pub fn with_sight(mut self, handle: SensorHandle) -> Self {
        self.sight = Some(handle);
        self
    }

    pub fn handle(&self, kind: SensorKind) -> Option<SensorHandle> {
        match kind {
            SensorKind::Ground => self.ground,
            SensorKind::Melee => self.melee,
            SensorKind::Sight => self.sight,
        }
    }

    pub fn has(&self, kind: SensorKind) -> bool {
        self.handle(kind).is_some()
    }

    pub fn has_ground_sensor(&self) -> bool {
        self.ground.is_some()
    }

    pub fn has_melee_sensor(&self) -> bool {
        self.melee.is_some()
    }

    pub fn has_sight_sensor(&self) -> bool {
        self.sight.is_some()
    }
}

/// Текущие перекрытия сенсоров (обновляется из `SensorEvent`)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct SensorContacts {
    ground: Vec<Entity>,
    melee: Vec<Entity>,
    sight: Vec<Entity>,
}

impl SensorContacts {
    /// Тела, перекрывающие сенсор (в порядке входа)
    pub fn overlapping(&self, kind: SensorKind) -> &[Entity] {
        match kind {
            SensorKind::Ground => &self.ground,
            SensorKind::Melee => &self.melee,
            SensorKind::Sight => &self.sight,
        }
    }

    pub fn contains(&self, kind: SensorKind, body: Entity) -> bool {
        self.overlapping(kind).contains(&body)
    }

    /// false если тело уже было в списке
    pub fn insert(&mut self, kind: SensorKind, body: Entity) -> bool {
        let list = self.list_mut(kind);
        if list.contains(&body) {
            return false;
        }
        list.push(body);
        true
    }

    pub fn remove(&mut self, kind: SensorKind, body: Entity) -> bool {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|e| *e != body);
        list.len() != before
    }

    /// Убирает тело из всех сенсоров (despawn)
    pub fn forget(&mut self, body: Entity) {
        self.ground.retain(|e| *e != body);
        self.melee.retain(|e| *e != body);
        self.sight.retain(|e| *e != body);
    }

    fn list_mut(&mut self, kind: SensorKind) -> &mut Vec<Entity> {
        match kind {
            SensorKind::Ground => &mut self.ground,
            SensorKind::Melee => &mut self.melee,
            SensorKind::Sight => &mut self.sight,
        }
    }
}

/// Events от host engine: тело вошло/вышло из сенсора `owner`
#[derive(Event, Debug, Clone)]
pub enum SensorEvent {
    BodyEntered {
        owner: Entity,
        sensor: SensorKind,
        body: Entity,
    },
    BodyExited {
        owner: Entity,
        sensor: SensorKind,
        body: Entity,
    },
}

impl SensorEvent {
    pub fn owner(&self) -> Entity {
        match self {
            SensorEvent::BodyEntered { owner, .. } | SensorEvent::BodyExited { owner, .. } => *owner,
        }
    }

    pub fn sensor(&self) -> SensorKind {
        match self {
            SensorEvent::BodyEntered { sensor, .. } | SensorEvent::BodyExited { sensor, .. } => *sensor,
        }
    }

    pub fn body(&self) -> Entity {
        match self {
            SensorEvent::BodyEntered { body, .. } | SensorEvent::BodyExited { body, .. } => *body,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, SensorEvent::BodyEntered { .. })
    }
}

/// System: SensorEvent → SensorContacts
///
/// Events для неподключённых сенсоров игнорируются.
pub fn track_sensor_contacts(
    mut events: EventReader<SensorEvent>,
    mut owners: Query<(&Sensors, &mut SensorContacts)>,
) {
    for event in events.read() {
        let Ok((sensors, mut contacts)) = owners.get_mut(event.owner()) else {
            continue;
        };

        let kind = event.sensor();
        if !sensors.has(kind) {
            continue;
        }

        match event {
            SensorEvent::BodyEntered { body, .. } => {
                contacts.insert(kind, *body);
            }
            SensorEvent::BodyExited { body, .. } => {
                contacts.remove(kind, *body);
            }
        }
    }
}

/// System: despawn'нутые тела выпадают из всех списков контактов
pub fn forget_removed_bodies(
    mut removed: EventReader<crate::combat::CombatantRemoved>,
    mut contacts: Query<&mut SensorContacts>,
) {
    for event in removed.read() {
        for mut list in contacts.iter_mut() {
            list.forget(event.entity);
        }
    }
}
