//! Runs one scenario per pattern and records what happened as a [`Transcript`].
//!
//! Library code never prints; the `catalog` binary renders transcripts.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use itertools::Itertools;
use serde::Serialize;

use crate::behavioral::{
    chain, command, iterator, mediator, memento, observer, state, strategy, template_method,
    visitor,
};
use crate::catalog::{Category, PatternId};
use crate::config::CatalogConfig;
use crate::creational::{abstract_factory, builder, factory_method, prototype, singleton};
use crate::error::Result;
use crate::structural::{adapter, bridge, composite, decorator, facade, flyweight, proxy};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub pattern: PatternId,
    pub category: Category,
    pub lines: Vec<String>,
}

impl Transcript {
    fn new(pattern: PatternId) -> Self {
        Self {
            pattern,
            category: pattern.category(),
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

/// Renders an expected rejection as a transcript line instead of failing the run.
fn outcome<T: Display, E: Display>(action: &str, result: std::result::Result<T, E>) -> String {
    match result {
        Ok(value) => format!("{action}: ok -> {value}"),
        Err(err) => format!("{action}: rejected ({err})"),
    }
}

pub fn run(pattern: PatternId, config: &CatalogConfig) -> Result<Transcript> {
    let mut t = Transcript::new(pattern);
    tracing::info!(%pattern, "running showcase");
    match pattern {
        PatternId::Singleton => run_singleton(&mut t, config),
        PatternId::FactoryMethod => run_factory_method(&mut t)?,
        PatternId::AbstractFactory => run_abstract_factory(&mut t)?,
        PatternId::Builder => run_builder(&mut t)?,
        PatternId::Prototype => run_prototype(&mut t)?,
        PatternId::Adapter => run_adapter(&mut t),
        PatternId::Bridge => run_bridge(&mut t)?,
        PatternId::Composite => run_composite(&mut t),
        PatternId::Decorator => run_decorator(&mut t)?,
        PatternId::Facade => run_facade(&mut t, config)?,
        PatternId::Flyweight => run_flyweight(&mut t)?,
        PatternId::Proxy => run_proxy(&mut t, config),
        PatternId::Chain => run_chain(&mut t)?,
        PatternId::Command => run_command(&mut t),
        PatternId::Iterator => run_iterator(&mut t),
        PatternId::Mediator => run_mediator(&mut t)?,
        PatternId::Memento => run_memento(&mut t)?,
        PatternId::Observer => run_observer(&mut t),
        PatternId::State => run_state(&mut t, config),
        PatternId::Strategy => run_strategy(&mut t, config)?,
        PatternId::TemplateMethod => run_template_method(&mut t)?,
        PatternId::Visitor => run_visitor(&mut t),
    }
    Ok(t)
}

/// Every pattern in catalogue order.
pub fn run_all(config: &CatalogConfig) -> Result<Vec<Transcript>> {
    PatternId::ALL.into_iter().map(|p| run(p, config)).collect()
}

// ============================================
// Creational
// ============================================

fn run_singleton(t: &mut Transcript, config: &CatalogConfig) {
    let racers = config.singleton.racers;

    let handles = singleton::race(racers, singleton::shared_instance);
    t.push(format!(
        "double-checked: {racers} racers, all handles identical = {}, constructions = {}",
        singleton::all_same(&handles),
        singleton::shared_constructions()
    ));

    let handles = singleton::race(racers, singleton::once_instance);
    t.push(format!(
        "run-once: {racers} racers, all handles identical = {}, constructions = {}",
        singleton::all_same(&handles),
        singleton::once_constructions()
    ));

    singleton::logger().log("singleton showcase ran");
    t.push(format!(
        "shared logger holds {} line(s)",
        singleton::logger().lines().len()
    ));
}

fn run_factory_method(t: &mut Transcript) -> Result<()> {
    let registry = factory_method::notification_registry();
    for channel in registry.names() {
        t.push(registry.create(channel)?.send("Your order has shipped"));
    }

    for system in ["windows", "web"] {
        let button = factory_method::create_button(system)?;
        t.push(button.render());
        t.push(button.on_click());
    }
    if let Err(err) = factory_method::create_button("mac") {
        t.push(format!("mac button: {err}"));
    }
    Ok(())
}

fn run_abstract_factory(t: &mut Transcript) -> Result<()> {
    for family in ["modern", "victorian"] {
        let factory = abstract_factory::furniture_factory(family)?;
        let sofa = factory.create_sofa();
        let table = factory.create_coffee_table();
        t.push(factory.create_chair().sit_on());
        t.push(format!("{} sofa with {} seats", sofa.style(), sofa.seats()));
        t.push(format!("{} {} coffee table", table.style(), table.shape()));
    }

    for faction in ["elf", "orc"] {
        let armoury = abstract_factory::armoury(faction)?;
        for weapon in [armoury.create_bow(), armoury.create_sword(), armoury.create_axe()] {
            t.push(weapon.attack());
        }
    }
    if let Err(err) = abstract_factory::armoury("dwarf") {
        t.push(format!("dwarf armoury: {err}"));
    }
    Ok(())
}

fn run_builder(t: &mut Transcript) -> Result<()> {
    let mut director = builder::Director::new(builder::car_builder("suv")?);
    t.push(format!("SUV -> {}", director.construct()));
    director.set_builder(builder::car_builder("sport")?);
    t.push(format!("sport -> {}", director.construct()));

    let computer = builder::ComputerBuilder::new()
        .cpu("Intel i7")
        .ram(16)
        .build()?;
    t.push(format!(
        "computer: {} / {} GB / {}",
        computer.cpu, computer.ram_gb, computer.storage
    ));
    t.push(outcome(
        "computer without ram",
        builder::ComputerBuilder::new().cpu("M2").build().map(|c| c.cpu),
    ));
    Ok(())
}

fn run_prototype(t: &mut Transcript) -> Result<()> {
    use prototype::Shape;

    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(prototype::Rectangle {
            width: 2.0,
            height: 3.0,
        }),
        Box::new(prototype::Circle { radius: 1.5 }),
    ];
    let copies = shapes.clone();
    for (original, copy) in shapes.iter().zip(&copies) {
        t.push(format!(
            "{original:?} area {:.2}, clone area {:.2}",
            original.area(),
            copy.area()
        ));
    }

    let mut registry = prototype::PrototypeRegistry::new();
    registry.register("sedan", prototype::Vehicle::car("Model S", "Tesla", 2020));
    registry.register("hauler", prototype::Vehicle::truck("F-150", "Ford", 2019, 1000));
    t.push(format!("{:?}", registry.spawn("sedan")?.with_color("red")));
    t.push(format!("{:?}", registry.spawn("hauler")?.with_load_capacity(2000)));
    t.push(format!("untouched original: {:?}", registry.spawn("sedan")?));
    Ok(())
}

// ============================================
// Structural
// ============================================

fn run_adapter(t: &mut Transcript) {
    use adapter::MediaPlayer;

    let legacy = adapter::RectangleAdapter::new(adapter::LegacyRectangle {
        width: 3.0,
        height: 4.0,
    });
    t.push(adapter::show_area(&legacy));
    t.push(adapter::show_area(&adapter::Circle { radius: 1.0 }));

    let players: [(&str, Box<dyn MediaPlayer>); 2] = [
        ("modern", Box::new(adapter::ModernPlayer)),
        ("adapted mp3", Box::new(adapter::Mp3Adapter::new(adapter::LegacyMp3Player))),
    ];
    for (label, player) in &players {
        t.push(format!("{label}: {}", player.play_mp4("Numb")));
        t.push(format!("{label}: {}", player.play_vlc("In the End")));
    }
}

fn run_bridge(t: &mut Transcript) -> Result<()> {
    for figure in [
        bridge::Figure::Circle { radius: 1.0 },
        bridge::Figure::Square { side: 2.0 },
    ] {
        let mut shape = bridge::DrawnShape::new(figure, bridge::renderer("raster")?);
        t.push(shape.draw());
        shape.set_renderer(bridge::renderer("vector")?);
        t.push(shape.draw());
    }
    Ok(())
}

fn run_composite(t: &mut Transcript) {
    use composite::Entry;

    let root = Entry::folder("root")
        .with(Entry::file("readme.txt", 120))
        .with(
            Entry::folder("src")
                .with(Entry::file("main.rs", 2048))
                .with(Entry::file("notes.txt", 64)),
        )
        .with(Entry::folder("empty"));

    t.lines.extend(root.display());
    t.push(format!("total size {} bytes in {} files", root.size(), root.file_count()));
    t.push(format!("search 'txt': {}", root.search("txt").join(", ")));
}

fn run_decorator(t: &mut Transcript) -> Result<()> {
    use decorator::{Operation, Pizza};

    let mut timed = decorator::Timed::new(decorator::NamedOperation::new("sum to 1000", || {
        Ok((1..=1000u64).sum::<u64>().to_string())
    }));
    let first = timed.execute()?;
    timed.execute()?;
    t.push(format!("{} = {first}", timed.name()));
    t.push(format!(
        "timed {} call(s), last run measured = {}",
        timed.calls(),
        timed.last_duration().is_some()
    ));

    let pizza = decorator::CheeseTopping::on(decorator::TomatoTopping::on(decorator::VeggieMania));
    t.push(format!("{} costs {}", pizza.description(), pizza.price()));
    Ok(())
}

fn run_facade(t: &mut Transcript, config: &CatalogConfig) -> Result<()> {
    let inventory = facade::Inventory::with_stock([(1, 5), (2, 0)]);
    let mut shop = facade::OrderFacade::new(inventory, &config.facade);

    let receipt = shop.place_order(1, 2)?;
    t.push(format!(
        "order of {} x product {} charged {:.2}",
        receipt.quantity, receipt.product, receipt.charged
    ));
    t.push(outcome(
        "order of product 2",
        shop.place_order(2, 1).map(|r| r.charged),
    ));
    t.push(format!(
        "product 1 left: {}, payments recorded: {}",
        shop.inventory().quantity(1),
        shop.payments().ledger().len()
    ));
    Ok(())
}

fn run_flyweight(t: &mut Transcript) -> Result<()> {
    use flyweight::{GameObject, Team};

    let factory = flyweight::GameObjectFactory::new();
    let mut objects = Vec::new();
    for i in 0..5 {
        objects.push(GameObject::Tree {
            x: i,
            y: i * 2,
            kind: factory.object_type("Tree", "green", "Oak"),
        });
        objects.push(GameObject::Animal {
            x: i * 3,
            y: i,
            age: 2,
            kind: factory.object_type("Animal", "brown", "Deer"),
        });
    }
    t.lines.extend(objects.iter().take(2).map(GameObject::render));
    t.push(format!(
        "{} objects share {} types",
        objects.len(),
        factory.distinct_types()
    ));

    let dresses = flyweight::DressFactory::new();
    let mut players: Vec<_> = [Team::Terrorist, Team::Terrorist, Team::CounterTerrorist]
        .into_iter()
        .map(|team| flyweight::Player::new(&dresses, team))
        .collect();
    for (i, player) in players.iter_mut().enumerate() {
        player.move_to(i as i32, 10);
    }
    t.push(format!(
        "{} players, {} dresses created ({})",
        players.len(),
        dresses.created(),
        players.iter().map(|p| p.dress.color).unique().join("/")
    ));
    t.push(outcome(
        "dress 'swat'",
        dresses.dress_named("swat").map(|d| d.color),
    ));
    Ok(())
}

fn run_proxy(t: &mut Transcript, config: &CatalogConfig) {
    use proxy::{Image, Server};

    let mut image = proxy::ProxyImage::new("photo.jpg");
    t.push(format!("before display: loaded = {}", image.is_loaded()));
    t.push(image.display());
    t.push(image.display());
    t.push(format!("loads from disk: {}", image.loads()));

    let mut nginx = proxy::Nginx::new(&config.proxy);
    for _ in 0..=config.proxy.max_allowed_requests {
        let response = nginx.handle_request("/app/status", "GET");
        t.push(format!("GET /app/status -> {} {}", response.status, response.body));
    }
    let response = nginx.handle_request("/create/user", "POST");
    t.push(format!("POST /create/user -> {} {}", response.status, response.body));
}

// ============================================
// Behavioral
// ============================================

fn run_chain(t: &mut Transcript) -> Result<()> {
    use chain::{Issue, Severity};

    let mut desk = chain::SupportDesk::new();
    t.push(format!("agents: {}", desk.agents().join(" -> ")));
    for severity in [Severity::Low, Severity::Medium, Severity::High] {
        let issue = Issue::new(severity, format!("Issue {severity}"));
        match desk.submit(issue) {
            crate::Dispatch::Handled { by, output } => t.push(format!("{output} [{by}]")),
            crate::Dispatch::Unhandled => t.push("unhandled"),
        }
    }

    let mut thin = chain::SupportDesk::with_agents(&[Severity::Low]);
    t.push(outcome(
        "high issue on a low-only desk",
        thin.resolve(Issue::new(Severity::High, "outage")),
    ));

    let mut hospital = chain::Hospital::new();
    let mut patient = chain::Patient::new("abc");
    let steps = hospital.treat(&mut patient)?;
    t.push(format!("patient {} visited: {}", patient.name, steps.join(" -> ")));
    t.push(format!(
        "second pass performed {} step(s)",
        hospital.treat(&mut patient)?.len()
    ));
    Ok(())
}

fn run_command(t: &mut Transcript) {
    use command::*;

    let light = Rc::new(RefCell::new(Light::default()));
    let fan = Rc::new(RefCell::new(Fan::default()));
    let thermostat = Rc::new(RefCell::new(Thermostat::default()));

    let mut remote = RemoteControl::new();
    remote.set_command(Box::new(LightCommand::on(&light)));
    remote.set_command(Box::new(FanCommand::on(&fan)));
    remote.set_command(Box::new(ThermostatSetCommand::new(&thermostat, 25)));

    while let Some(output) = remote.press_button() {
        t.push(output);
    }
    t.push(outcome("undo", remote.undo()));
    t.push(format!(
        "light on = {}, fan on = {}, thermostat = {}",
        light.borrow().is_on,
        fan.borrow().is_on,
        thermostat.borrow().temperature
    ));
}

fn run_iterator(t: &mut Transcript) {
    use iterator::{Book, BookCollection, Cursor};

    let collection = BookCollection::new(vec![
        Book::new("Design Patterns", "Gamma et al."),
        Book::new("Refactoring", "Martin Fowler"),
        Book::new("The Rust Programming Language", "Klabnik & Nichols"),
    ]);

    let mut cursor = collection.cursor();
    while cursor.has_next() {
        if let Some(book) = cursor.get_next() {
            t.push(format!("{} by {}", book.title, book.author));
        }
    }
    t.push(format!(
        "reversed: {}",
        collection.reverse_cursor().map(|b| b.title.as_str()).join(" | ")
    ));
}

fn run_mediator(t: &mut Transcript) -> Result<()> {
    use mediator::*;

    let mut tower = FlightControlTower::new();
    for name in ["Plane1", "Plane2", "Plane3"] {
        tower.add_aircraft(Airplane::new(name));
    }
    t.push(format!(
        "Plane1 -> 10000: {:?}",
        tower.request_altitude_change("Plane1", 10_000)?
    ));
    t.push(format!(
        "Plane1 -> 10000 again: {:?}",
        tower.request_altitude_change("Plane1", 10_000)?
    ));
    if let Some(plane) = tower.aircraft("Plane2") {
        t.lines.extend(plane.inbox().iter().cloned());
    }

    let mut station = StationManager::new();
    t.push(format!("P1 arrives: {:?}", station.arrive(Train::passenger("P1"))));
    t.push(format!("F1 arrives: {:?}", station.arrive(Train::freight("F1"))));
    let next = station.depart("P1")?.map(|train| train.id.clone());
    t.push(format!("P1 departs, platform now: {next:?}"));
    Ok(())
}

fn run_memento(t: &mut Transcript) -> Result<()> {
    let mut caretaker = memento::Caretaker::new();
    let mut originator = memento::Originator::new("A");
    for next in ["B", "C"] {
        caretaker.add(originator.create_memento());
        originator.set_state(next);
    }
    caretaker.add(originator.create_memento());

    for index in [1, 0] {
        caretaker.restore_into(&mut originator, index)?;
        t.push(format!("restored snapshot {index}: {}", originator.state()));
    }
    t.push(outcome(
        "restore snapshot 7",
        caretaker.restore_into(&mut originator, 7).map(|_| "restored"),
    ));
    t.push(format!("history still holds {} snapshots", caretaker.len()));

    let mut editor = memento::TextEditor::new();
    editor.set_text("Hello");
    editor.save();
    editor.append(", World!");
    t.push(format!("editor: {}", editor.text()));
    t.push(format!("after undo: {}", editor.undo()?));
    t.push(outcome("undo again", editor.undo().map(str::to_string)));
    Ok(())
}

fn run_observer(t: &mut Transcript) {
    use observer::*;

    let mut manager = EventManager::new();
    let alice = Customer::new("Alice");
    let bob = Customer::new("Bob");
    let alice_id = manager.subscribe(EventType::NewProduct, alice.clone());
    manager.subscribe(EventType::NewProduct, bob.clone());
    manager.subscribe(EventType::NewOrder, bob.clone());

    t.push(format!(
        "new product notified {}",
        manager.notify(EventType::NewProduct, "New product available!")
    ));
    manager.unsubscribe(EventType::NewProduct, alice_id);
    t.push(format!(
        "after Alice unsubscribed, new product notified {}",
        manager.notify(EventType::NewProduct, "Another product!")
    ));
    t.push(format!(
        "new order notified {}",
        manager.notify(EventType::NewOrder, "Order #42 placed")
    ));

    let mut shirt = Item::new("Nike Shirt");
    let carol = Customer::new("Carol");
    shirt.register(carol.clone());
    t.push(format!("restock notified {}", shirt.update_availability(true)));
    t.push(format!("restock again notified {}", shirt.update_availability(true)));

    for customer in [&alice, &bob, &carol] {
        t.lines.extend(customer.received());
    }
}

fn run_state(t: &mut Transcript, config: &CatalogConfig) {
    let mut vm = state::VendingMachine::from_settings(&config.vending);
    let price = vm.item_price();
    t.push(format!("start: {} with {} item(s) at {price}", vm.state(), vm.item_count()));

    t.push(outcome("insert money", vm.insert_money(price)));
    t.push(outcome("request item", vm.request_item()));
    t.push(outcome("insert too little", vm.insert_money(price.saturating_sub(1))));
    t.push(outcome("insert enough", vm.insert_money(price)));
    t.push(outcome("dispense", vm.dispense_item()));
    t.push(outcome("request item", vm.request_item()));
    t.push(outcome("add 2 items", vm.add_item(2)));
    t.push(format!("end: {} with {} item(s)", vm.state(), vm.item_count()));

    let mut player = state::MediaPlayer::new("Bohemian Rhapsody");
    t.push(player.play());
    t.push(player.pause());
    t.push(player.stop());
}

fn run_strategy(t: &mut Transcript, config: &CatalogConfig) -> Result<()> {
    let mut cache = strategy::Cache::from_settings(&config.cache)?;
    let capacity = cache.capacity();
    t.push(format!("cache capacity {capacity}, policy {}", cache.policy()));

    for i in 0..=capacity {
        let evicted = cache.add(format!("key{i}"), format!("value{i}"));
        t.push(format!("add key{i}: evicted {evicted:?}"));
    }
    cache.get("key1");

    for policy in ["lru", "lfu"] {
        cache.set_eviction_algo(strategy::eviction_algo(policy)?);
        let key = format!("{policy}-key");
        let evicted = cache.add(key.clone(), "v");
        t.push(format!("[{policy}] add {key}: evicted {evicted:?}"));
    }
    t.push(format!("{} eviction(s), {} entries", cache.evictions(), cache.len()));

    let mut checkout = strategy::Checkout::new(Box::new(strategy::CreditCard {
        last_four: "4242".to_string(),
    }));
    t.push(checkout.pay(100.0)?.to_string());
    checkout.set_strategy(Box::new(strategy::PayPal {
        email: "user@example.com".to_string(),
    }));
    t.push(checkout.pay(42.5)?.to_string());
    Ok(())
}

fn run_template_method(t: &mut Transcript) -> Result<()> {
    use template_method::*;

    t.lines.extend(Recipe::new(Tea).prepare());
    t.lines.extend(Recipe::new(Coffee { with_milk: true }).prepare());

    let mut sms = Otp::new(SmsOtp::default());
    let code = sms.generate_and_send(4)?;
    t.push(format!("sms otp has {} digits", code.len()));
    let mut email = Otp::new(EmailOtp::default());
    email.generate_and_send(6)?;
    t.lines.extend(email.steps().outbox.iter().map(|m| {
        // Codes are random; keep the transcript stable.
        let digits = m.chars().filter(char::is_ascii_digit).count();
        format!("email sent with a {digits}-digit code")
    }));
    Ok(())
}

fn run_visitor(t: &mut Transcript) {
    use visitor::*;

    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Circle {
            center: Point::new(0.0, 0.0),
            radius: 5.0,
        }),
        Box::new(Rectangle {
            origin: Point::new(0.0, 0.0),
            width: 4.0,
            height: 6.0,
        }),
        Box::new(Triangle {
            vertices: [Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(0.0, 4.0)],
        }),
    ];

    let mut areas = AreaCalculator::default();
    let mut perimeters = PerimeterCalculator::default();
    let mut middles = MiddleCoordinates::default();
    visit_all(&shapes, &mut areas);
    visit_all(&shapes, &mut perimeters);
    visit_all(&shapes, &mut middles);

    for m in &areas.results {
        t.push(format!("Area of {}: {:.2}", m.shape, m.value));
    }
    for m in &perimeters.results {
        t.push(format!("Perimeter of {}: {:.2}", m.shape, m.value));
    }
    for m in &middles.results {
        t.push(format!("Middle of {}: {}", m.shape, m.value));
    }
}
