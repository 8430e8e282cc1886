use todoey_core::db::open_db_in_memory;
use todoey_core::view::{NO_CATEGORIES_PLACEHOLDER, NO_ITEMS_PLACEHOLDER};
use todoey_core::{
    Category, CategoryListSource, CategoryRepository, Colour, DisplayRow, Item, ItemListSource,
    ItemRepository, ListSource, SqliteCategoryRepository, SqliteItemRepository, SwipeList,
};
use uuid::Uuid;

#[test]
fn empty_category_list_shows_single_placeholder() {
    let conn = open_db_in_memory().unwrap();
    let source = CategoryListSource::new(SqliteCategoryRepository::try_new(&conn).unwrap());
    let mut list = SwipeList::new(source).unwrap();

    assert!(list.records().is_empty());
    assert_eq!(list.row_count(), 1);
    assert_eq!(
        list.row(0),
        Some(DisplayRow::Placeholder(NO_CATEGORIES_PLACEHOLDER))
    );
    assert_eq!(list.row(1), None);
    assert!(!list.delete_at(0).unwrap());
}

#[test]
fn category_rows_carry_colour_and_contrast() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    let dark = Category::new("Night", Colour::parse("000000").unwrap());
    repo.create_category(&dark).unwrap();

    let list = SwipeList::new(CategoryListSource::new(repo)).unwrap();
    let rows = list.records();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Night");
    assert_eq!(rows[0].background.as_str(), "000000");
    assert_eq!(rows[0].text_colour.as_str(), "ECF0F1");
    assert!(!rows[0].checked);
}

#[test]
fn delete_at_removes_record_and_reloads() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    for name in ["Work", "Home"] {
        repo.create_category(&Category::new(name, Colour::default()))
            .unwrap();
    }

    let mut list = SwipeList::new(CategoryListSource::new(repo)).unwrap();
    assert_eq!(list.row_count(), 2);

    assert!(list.delete_at(0).unwrap());
    assert_eq!(list.records().len(), 1);
    assert_eq!(list.records()[0].title, "Home");
    assert!(!list.delete_at(5).unwrap());
}

#[test]
fn item_rows_darken_and_show_checkmarks() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let work = Category::new("Work", Colour::parse("808080").unwrap());
    categories.create_category(&work).unwrap();
    let first = Item::with_id(Uuid::new_v4(), work.id, "Email boss").created_at(1_000);
    let second = Item::with_id(Uuid::new_v4(), work.id, "File report").created_at(2_000);
    items.create_item(&first).unwrap();
    items.create_item(&second).unwrap();
    items.toggle_done(first.id).unwrap();

    let list = SwipeList::new(ItemListSource::new(items, work)).unwrap();
    let rows = list.records();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].background.as_str(), "808080");
    assert_eq!(rows[1].background.as_str(), "404040");
    assert!(rows[0].checked);
    assert!(!rows[1].checked);
}

#[test]
fn item_list_query_filters_and_resets() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let shopping = Category::new("Shopping", Colour::default());
    categories.create_category(&shopping).unwrap();
    items
        .create_item(&Item::with_id(Uuid::new_v4(), shopping.id, "Buy Milk").created_at(1))
        .unwrap();
    items
        .create_item(&Item::with_id(Uuid::new_v4(), shopping.id, "Bread").created_at(2))
        .unwrap();

    let mut list = SwipeList::new(ItemListSource::new(items, shopping)).unwrap();
    list.source_mut().set_query("milk");
    list.reload().unwrap();
    assert_eq!(list.records().len(), 1);

    list.source_mut().set_query("eggs");
    list.reload().unwrap();
    assert_eq!(
        list.row(0),
        Some(DisplayRow::Placeholder(NO_ITEMS_PLACEHOLDER))
    );

    list.source_mut().set_query("");
    list.reload().unwrap();
    assert_eq!(list.records().len(), 2);
}

#[test]
fn toggle_row_flips_backing_item() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let work = Category::new("Work", Colour::default());
    categories.create_category(&work).unwrap();
    items.create_item(&Item::new(work.id, "Email boss")).unwrap();

    let mut list = SwipeList::new(ItemListSource::new(items, work)).unwrap();
    let row = list.records()[0].clone();
    assert!(list.source().toggle_row(&row).unwrap());
    list.reload().unwrap();
    assert!(list.records()[0].checked);
    assert_eq!(list.source().rows().unwrap()[0].id, row.id);
}
