use rb_ordered_map::Set;

fn main() {
    let set = Set::new();
    for k in [1, 5, 3, 4, 2] {
        set.insert(k);
    }

    set.read(|tree| {
        let mut cursor = tree.cursor_front();
        while let Ok(k) = cursor.key() {
            println!("{k}");
            let _ = cursor.move_next();
        }
    });
}
