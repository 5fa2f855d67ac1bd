use crate::{Error, Filesystem, Handle, ROOT_HANDLE};

#[test]
fn test_collisions_report_created_kind() {
    let mut fs = Filesystem::new(100);
    let taken = fs.create_directory("taken").unwrap();

    assert_eq!(fs.create_file(1, "taken"), Err(Error::file_exists("taken")));
    assert_eq!(fs.create_directory("taken"), Err(Error::directory_exists("taken")));
    assert_eq!(fs.create_link(taken, "taken"), Err(Error::link_exists("taken")));
    assert_eq!(fs.get_available_size(), 100);
}

#[test]
fn test_same_name_in_different_directories() {
    let mut fs = Filesystem::new(100);
    let a = fs.create_directory("a").unwrap();
    let b = fs.create_directory("b").unwrap();

    let fa = fs.create_file_in(1, "same", a).unwrap();
    let fb = fs.create_file_in(1, "same", b).unwrap();
    assert_ne!(fa, fb);
    assert_eq!(fs.get_handle("/a/same"), Ok(fa));
    assert_eq!(fs.get_handle("/b/same"), Ok(fb));
}

#[test]
fn test_rename() {
    let mut fs = Filesystem::new(100);
    let d = fs.create_directory("d").unwrap();
    let f = fs.create_file_in(7, "old", d).unwrap();
    fs.create_file_in(1, "other", d).unwrap();

    fs.rename(f, "new").unwrap();
    assert_eq!(fs.get_name(f).unwrap(), "new");
    assert_eq!(fs.get_handle("/d/new"), Ok(f));
    assert_eq!(fs.get_handle("/d/old"), Err(Error::invalid_path("/d/old")));
    assert_eq!(fs.get_file_size(f), Ok(7));
    assert_eq!(fs.get_largest_file_handle(), Ok(f));

    assert_eq!(fs.rename(f, "other"), Err(Error::name_exists("other")));
    // Renaming to its own current name collides with itself.
    assert_eq!(fs.rename(f, "new"), Err(Error::name_exists("new")));
    assert_eq!(fs.rename(f, "x/y"), Err(Error::invalid_name("x/y")));
    assert_eq!(
        fs.rename(Handle::new(99), "z"),
        Err(Error::InvalidHandle(Handle::new(99)))
    );
}

#[test]
fn test_rename_keeps_position() {
    let mut fs = Filesystem::new(100);
    let a = fs.create_file(1, "a").unwrap();
    let b = fs.create_file(1, "b").unwrap();
    let c = fs.create_file(1, "c").unwrap();

    fs.rename(a, "z").unwrap();
    assert_eq!(fs.children(ROOT_HANDLE).unwrap(), &[a, b, c]);
}

#[test]
fn test_move_entry() {
    let mut fs = Filesystem::new(100);
    let src = fs.create_directory("src").unwrap();
    let dst = fs.create_directory("dst").unwrap();
    let f = fs.create_file_in(9, "f", src).unwrap();

    fs.move_entry(f, dst).unwrap();
    assert!(fs.children(src).unwrap().is_empty());
    assert_eq!(fs.children(dst).unwrap(), &[f]);
    assert_eq!(fs.get_absolute_path(f).unwrap(), "/dst/f");
    assert_eq!(fs.get_available_size(), 91);
    assert_eq!(fs.get_largest_file_handle(), Ok(f));

    // Moving into the current parent changes nothing.
    fs.move_entry(f, dst).unwrap();
    assert_eq!(fs.children(dst).unwrap(), &[f]);
}

#[test]
fn test_move_entry_through_link_destination() {
    let mut fs = Filesystem::new(100);
    let dst = fs.create_directory("dst").unwrap();
    let to_dst = fs.create_link(dst, "to_dst").unwrap();
    let f = fs.create_file(1, "f").unwrap();

    fs.move_entry(f, to_dst).unwrap();
    assert_eq!(fs.get_absolute_path(f).unwrap(), "/dst/f");
}

#[test]
fn test_move_entry_guards() {
    let mut fs = Filesystem::new(100);
    let a = fs.create_directory("a").unwrap();
    let b = fs.create_directory_in("b", a).unwrap();
    let c = fs.create_directory_in("c", b).unwrap();
    let f = fs.create_file(1, "f").unwrap();
    fs.create_file_in(1, "f", c).unwrap();

    assert_eq!(fs.move_entry(a, a), Err(Error::CycleDetected(a)));
    assert_eq!(fs.move_entry(a, b), Err(Error::CycleDetected(a)));
    assert_eq!(fs.move_entry(a, c), Err(Error::CycleDetected(a)));
    assert_eq!(fs.move_entry(f, c), Err(Error::name_exists("f")));
    assert_eq!(fs.move_entry(b, f), Err(Error::InvalidHandle(f)));
    assert_eq!(
        fs.move_entry(ROOT_HANDLE, a),
        Err(Error::InvalidHandle(ROOT_HANDLE))
    );

    assert_eq!(fs.get_absolute_path(c).unwrap(), "/a/b/c");
}

#[test]
fn test_move_directory_up() {
    let mut fs = Filesystem::new(100);
    let a = fs.create_directory("a").unwrap();
    let b = fs.create_directory_in("b", a).unwrap();
    let f = fs.create_file_in(2, "f", b).unwrap();

    fs.move_entry(b, ROOT_HANDLE).unwrap();
    assert_eq!(fs.get_absolute_path(f).unwrap(), "/b/f");
    assert_eq!(fs.children(ROOT_HANDLE).unwrap(), &[a, b]);
    assert_eq!(fs.remove(a), Ok(true));
}
