use std::cell::RefCell;
use std::rc::Rc;

use broadside::{
    AttackResult, Coord, EventBus, MatchError, MoveEvent, MoveResult, Orientation, Player,
    PlayerId, ShotEvent, BOARD_SIZE, NUM_SHIPS,
};

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

fn pair() -> (EventBus, Player, Player) {
    let bus = EventBus::new();
    let one = Player::with_seed(PlayerId::ONE, 1);
    let two = Player::with_seed(PlayerId::TWO, 2);
    one.configure_bus(&bus).unwrap();
    two.configure_bus(&bus).unwrap();
    (bus, one, two)
}

fn record_moves(bus: &EventBus) -> Rc<RefCell<Vec<MoveEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    bus.moves()
        .subscribe(move |event: &MoveEvent| sink.borrow_mut().push(*event));
    seen
}

#[test]
fn test_manual_move() {
    let player = Player::with_seed(PlayerId::ONE, 3);
    assert_eq!(player.make_move(Some(c(1, 2))), MoveResult::Accepted(c(1, 2)));
    assert_eq!(player.moves(), vec![c(1, 2)]);
}

#[test]
fn test_random_move_is_on_board() {
    let player = Player::with_seed(PlayerId::ONE, 3);
    for _ in 0..20 {
        let result = player.make_move(None);
        assert!(result.coord().in_bounds());
    }
    let mut moves = player.moves();
    let total = moves.len();
    moves.sort();
    moves.dedup();
    assert_eq!(moves.len(), total);
}

#[test]
fn test_off_board_move_is_ignored() {
    let player = Player::with_seed(PlayerId::ONE, 3);
    let off = c(BOARD_SIZE as i32, 0);
    assert_eq!(player.make_move(Some(off)), MoveResult::OutOfBounds(off));
    assert!(player.moves().is_empty());
}

#[test]
fn test_duplicate_move_rejected_and_announced() {
    let (bus, one, _two) = pair();
    let seen = record_moves(&bus);
    assert!(one.make_move(Some(c(4, 4))).is_accepted());
    assert_eq!(one.make_move(Some(c(4, 4))), MoveResult::Duplicate(c(4, 4)));
    assert_eq!(one.moves(), vec![c(4, 4)]);
    assert_eq!(
        *seen.borrow(),
        vec![
            MoveEvent::Attack {
                coord: c(4, 4),
                attacker: PlayerId::ONE
            },
            MoveEvent::Duplicate {
                coord: c(4, 4),
                attacker: PlayerId::ONE
            },
        ]
    );
}

#[test]
fn test_move_is_published_with_attacker() {
    let bus = EventBus::new();
    let player = Player::with_seed(PlayerId::ONE, 5);
    player.configure_bus(&bus).unwrap();
    let seen = record_moves(&bus);
    player.make_move(Some(c(5, 5)));
    assert_eq!(
        *seen.borrow(),
        vec![MoveEvent::Attack {
            coord: c(5, 5),
            attacker: PlayerId::ONE
        }]
    );
}

#[test]
fn test_self_attack_is_ignored() {
    let player = Player::with_seed(PlayerId::ONE, 1);
    player.place_ship(1, c(0, 0), Orientation::Right).unwrap();
    assert_eq!(player.receive_attack(c(0, 0), PlayerId::ONE), None);
    assert!(player.hits().is_empty());
    assert_eq!(
        player.receive_attack(c(0, 0), PlayerId::TWO),
        Some(AttackResult::Sink { length: 1 })
    );
    assert_eq!(player.hits(), vec![c(0, 0)]);
}

#[test]
fn test_receive_attack_publishes_victim_side() {
    let (bus, one, _two) = pair();
    one.place_ship(2, c(3, 3), Orientation::Up).unwrap();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let misses = Rc::new(RefCell::new(Vec::new()));
    {
        let hits = hits.clone();
        bus.hits().subscribe(move |e: &ShotEvent| hits.borrow_mut().push(*e));
        let misses = misses.clone();
        bus.misses().subscribe(move |e: &ShotEvent| misses.borrow_mut().push(*e));
    }
    assert_eq!(one.receive_attack(c(3, 4), PlayerId::TWO), Some(AttackResult::Hit));
    assert_eq!(one.receive_attack(c(0, 0), PlayerId::TWO), Some(AttackResult::Miss));
    assert_eq!(
        one.receive_attack(c(3, 4), PlayerId::TWO),
        Some(AttackResult::AlreadyHit)
    );
    assert_eq!(
        *hits.borrow(),
        vec![ShotEvent {
            coord: c(3, 4),
            target: PlayerId::ONE
        }]
    );
    assert_eq!(
        *misses.borrow(),
        vec![ShotEvent {
            coord: c(0, 0),
            target: PlayerId::ONE
        }]
    );
    assert_eq!(one.misses(), vec![c(0, 0)]);
}

#[test]
fn test_off_board_attack_is_not_published() {
    let (bus, one, _two) = pair();
    one.place_ship(1, c(0, 0), Orientation::Up).unwrap();
    let misses = Rc::new(RefCell::new(0));
    {
        let misses = misses.clone();
        bus.misses().subscribe(move |_: &ShotEvent| *misses.borrow_mut() += 1);
    }
    assert_eq!(
        one.receive_attack(c(42, -1), PlayerId::TWO),
        Some(AttackResult::OffBoard)
    );
    assert_eq!(*misses.borrow(), 0);
    assert!(one.misses().is_empty());
}

#[test]
fn test_notifications_only_count_opponent_boards() {
    let player = Player::with_seed(PlayerId::ONE, 1);
    player.notify_hit(c(1, 1), PlayerId::TWO);
    player.notify_hit(c(2, 2), PlayerId::ONE);
    player.notify_miss(c(3, 3), PlayerId::TWO);
    player.notify_miss(c(4, 4), PlayerId::ONE);
    assert_eq!(player.moves_that_hit(), vec![c(1, 1)]);
    assert_eq!(player.moves_that_missed(), vec![c(3, 3)]);
}

#[test]
fn test_hit_between_players() {
    let (_bus, one, two) = pair();
    two.place_ship(2, c(6, 6), Orientation::Right).unwrap();

    one.make_move(Some(c(6, 6)));
    one.make_move(Some(c(0, 9)));

    assert_eq!(one.moves_that_hit(), vec![c(6, 6)]);
    assert_eq!(one.moves_that_missed(), vec![c(0, 9)]);
    assert_eq!(two.hits(), vec![c(6, 6)]);
    assert_eq!(two.misses(), vec![c(0, 9)]);
    assert!(two.moves_that_hit().is_empty());
    assert!(one.hits().is_empty());
}

#[test]
fn test_loss_published_once() {
    let (bus, one, two) = pair();
    let losses = Rc::new(RefCell::new(Vec::new()));
    {
        let losses = losses.clone();
        bus.losses().subscribe(move |id: &PlayerId| losses.borrow_mut().push(*id));
    }
    two.place_ship(2, c(0, 0), Orientation::Right).unwrap();
    two.place_ship(1, c(5, 5), Orientation::Right).unwrap();

    one.make_move(Some(c(0, 0)));
    one.make_move(Some(c(1, 0)));
    assert!(!two.has_lost());
    assert!(losses.borrow().is_empty());

    one.make_move(Some(c(5, 5)));
    assert!(two.has_lost());
    assert!(two.has_lost());
    assert_eq!(*losses.borrow(), vec![PlayerId::TWO]);
    assert!(!one.has_lost());
}

#[test]
fn test_unconfigured_player_has_no_side_effects() {
    let player = Player::with_seed(PlayerId::ONE, 1);
    player.place_ship(1, c(2, 2), Orientation::Up).unwrap();
    assert!(!player.is_configured());
    assert!(player.make_move(Some(c(1, 1))).is_accepted());
    assert_eq!(
        player.receive_attack(c(2, 2), PlayerId::TWO),
        Some(AttackResult::Sink { length: 1 })
    );
    assert!(player.has_lost());
}

#[test]
fn test_configure_twice_rejected() {
    let bus = EventBus::new();
    let player = Player::with_seed(PlayerId::ONE, 1);
    player.configure_bus(&bus).unwrap();
    assert_eq!(
        player.configure_bus(&bus),
        Err(MatchError::BusAlreadyConfigured)
    );
    assert_eq!(bus.moves().subscriber_count(), 1);
    assert_eq!(bus.hits().subscriber_count(), 1);
    assert_eq!(bus.misses().subscriber_count(), 1);
}

#[test]
fn test_player_fleet_placement() {
    let player = Player::with_seed(PlayerId::TWO, 11);
    player.place_fleet_randomly().unwrap();
    assert_eq!(player.ship_count(), NUM_SHIPS);
    assert_eq!(player.ship_coords().len(), 20);
    assert_eq!(player.snapshot().ships.len(), NUM_SHIPS);
    assert_eq!(player.render_grid().matches(" S ").count(), 20);
}
