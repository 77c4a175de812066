use orange_cache::{
    Cache, CacheError, Delivery, Month, Orange, Record, CURRENT_MONTH, ORANGE_CACHE_SIZE,
    ORANGE_MAX_SIZE,
};
use std::iter::FromIterator;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn orange(size: u16, month: Month, companies: &[&str]) -> Orange {
    let capacity = companies.len().max(1) as i32;
    companies
        .iter()
        .try_fold(Orange::new(size, month, capacity, 10).unwrap(), |o, c| {
            o.with_food_company(*c)
        })
        .unwrap()
}

fn sizes(list: &orange_cache::List<Orange>) -> Vec<u16> {
    Vec::from_iter(list.iter().map(Orange::size))
}

#[test]
fn every_size_has_its_own_cell() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    assert_eq!(cache.capacity(), ORANGE_CACHE_SIZE);

    cache.push(&orange(1, Month::Jan, &[])).unwrap();
    cache.push(&orange(ORANGE_MAX_SIZE, Month::Jan, &[])).unwrap();

    assert_eq!(cache.cell(0).unwrap().len(), 1);
    assert_eq!(cache.cell(ORANGE_CACHE_SIZE - 1).unwrap().len(), 1);
    assert_eq!(
        cache.cell(ORANGE_CACHE_SIZE).err(),
        Some(CacheError::OutOfRange {
            index: ORANGE_CACHE_SIZE,
            capacity: ORANGE_CACHE_SIZE
        })
    );
}

#[test]
fn pushed_oranges_are_copies() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    let original = orange(4, Month::Mar, &["Osem"]);
    cache.push(&original).unwrap();
    drop(original);

    let stored = cache.get(3).unwrap();
    assert_eq!(stored.food_companies(), ["Osem"]);
    assert!(cache.is_empty());
}

#[test]
fn walk_the_whole_inventory() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    for size in [10, 3, 10, 200] {
        cache.push(&orange(size, Month::Dec, &[])).unwrap();
    }

    let mut seen = Vec::new();
    let mut cell = cache.get_first();
    while let Some(list) = cell {
        let mut item = list.get_first();
        while let Some(o) = item {
            seen.push(o.size());
            item = list.get_next();
        }
        cell = cache.get_next();
    }
    assert_eq!(seen, vec![3, 10, 10, 200]);
    assert!(cache.get_current().is_none());
}

#[test]
fn free_the_orange_under_the_cell_cursor() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    cache.push(&orange(6, Month::Jan, &[])).unwrap();
    cache.push(&orange(6, Month::Feb, &[])).unwrap();
    cache.push(&orange(6, Month::Mar, &[])).unwrap();

    // The cell reads Mar, Feb, Jan.
    let cell = cache.cell(5).unwrap();
    cell.get_first();
    cell.get_next();
    cache.free_orange(5).unwrap();

    let months = Vec::from_iter(
        cache
            .cell(5)
            .unwrap()
            .iter()
            .map(Orange::expiration_month),
    );
    assert_eq!(months, vec![Month::Mar, Month::Jan]);

    cache.free_orange(5).unwrap();
    cache.free_orange(5).unwrap();
    assert_eq!(
        cache.free_orange(5),
        Err(CacheError::NoElementsInCell { index: 5 })
    );
}

#[test]
fn find_oranges_by_company() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    cache.push(&orange(2, Month::Jan, &["Osem", "Tnuva"])).unwrap();
    cache.push(&orange(9, Month::Feb, &["Tnuva"])).unwrap();
    cache.push(&orange(9, Month::Mar, &["Strauss"])).unwrap();
    cache.push(&orange(2, Month::Apr, &["Tnuva"])).unwrap();

    let tnuva = cache.get_all_oranges_of_company("Tnuva").unwrap();
    let months = Vec::from_iter(tnuva.iter().map(Orange::expiration_month));
    assert_eq!(months, vec![Month::Apr, Month::Jan, Month::Feb]);

    let in_cell = cache.get_oranges_of_company_from_cell("Strauss", 8).unwrap();
    assert_eq!(sizes(&in_cell), vec![9]);
    assert!(cache
        .get_all_oranges_of_company("tnuva")
        .unwrap()
        .is_empty());
    assert_eq!(
        cache.get_all_oranges_of_company("").err(),
        Some(CacheError::IllegalArgument)
    );
    assert_eq!(cache.len(), 4);
}

#[test]
fn deliver_by_descending_size() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    for size in [5, 30, 5, 30, 12] {
        cache.push(&orange(size, Month::Jun, &[])).unwrap();
    }

    let mut rounds = Vec::new();
    loop {
        match cache.deliver_oranges_with_biggest_weight() {
            Delivery::Delivered(list) => rounds.push(sizes(&list)),
            Delivery::NothingToDeliver => break,
        }
    }
    assert_eq!(rounds, vec![vec![30, 30], vec![12], vec![5, 5]]);
    assert!(cache.is_empty());
}

#[test]
fn copied_cache_is_independent() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    cache.push(&orange(7, Month::Aug, &["Osem"])).unwrap();
    let mut copy = cache.try_copy().unwrap();

    let delivered = copy.deliver_oranges_with_biggest_weight();
    assert_eq!(delivered.len(), 1);
    assert!(copy.is_empty());
    assert_eq!(cache.len(), 1);
}

#[test]
fn expired_oranges_can_be_spotted_while_walking() {
    init_logging();
    let mut cache: Cache<Orange> = Cache::new().unwrap();
    cache.push(&orange(3, Month::Feb, &[])).unwrap();
    cache.push(&orange(3, Month::Dec, &[])).unwrap();

    let expired = cache
        .cells()
        .flat_map(|cell| cell.iter())
        .filter(|o| o.is_expired_in(CURRENT_MONTH))
        .count();
    assert_eq!(expired, 1);
    assert_eq!(orange(3, Month::Dec, &[]).bucket(), 2);
}
