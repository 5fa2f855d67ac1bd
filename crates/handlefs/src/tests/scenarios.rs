use crate::{Error, Filesystem, ROOT_HANDLE};

#[test]
fn test_quota_inside_directory() {
    let mut fs = Filesystem::new(100);
    let docs = fs.create_directory("docs").unwrap();

    fs.create_file_in(50, "a.txt", docs).unwrap();
    assert_eq!(fs.get_available_size(), 50);

    let result = fs.create_file_in(60, "b.txt", docs);
    assert_eq!(result, Err(Error::exceeds_size(60, 50)));
    assert_eq!(fs.get_available_size(), 50);
    assert_eq!(fs.children(docs).unwrap().len(), 1);
}

#[test]
fn test_remove_empty_directory_then_use_stale_handle() {
    let mut fs = Filesystem::new(100);
    let d = fs.create_directory("d").unwrap();

    assert_eq!(fs.remove(d), Ok(true));
    assert!(!fs.exists(d));
    assert_eq!(fs.create_file_in(1, "f", d), Err(Error::InvalidHandle(d)));
    assert_eq!(fs.create_directory_in("e", d), Err(Error::InvalidHandle(d)));
    assert_eq!(fs.remove(d), Err(Error::InvalidHandle(d)));
}

#[test]
fn test_follow_and_paths() {
    let mut fs = Filesystem::new(100);
    let x = fs.create_file(10, "x").unwrap();
    let lx = fs.create_link(x, "lx").unwrap();

    assert_eq!(fs.follow(lx), Ok(x));
    assert_eq!(fs.get_absolute_path(lx).unwrap(), "/lx");
    assert_eq!(fs.get_absolute_path(fs.follow(lx).unwrap()).unwrap(), "/x");
}

#[test]
fn test_largest_file_tracking() {
    let mut fs = Filesystem::new(100);
    let small = fs.create_file(30, "small").unwrap();
    let large = fs.create_file(70, "large").unwrap();

    assert_eq!(fs.get_largest_file_handle(), Ok(large));
    assert_eq!(fs.remove(large), Ok(true));
    assert_eq!(fs.get_largest_file_handle(), Ok(small));
    assert_eq!(fs.remove(small), Ok(true));
    assert_eq!(fs.get_largest_file_handle(), Err(Error::HeapEmpty));
}

#[test]
fn test_separator_in_name_rejected() {
    let mut fs = Filesystem::new(100);
    assert_eq!(fs.create_file(1, "a/b"), Err(Error::invalid_name("a/b")));
    assert_eq!(fs.create_directory("a/b"), Err(Error::invalid_name("a/b")));
    assert_eq!(
        fs.create_link(ROOT_HANDLE, "a/b"),
        Err(Error::invalid_name("a/b"))
    );
    assert!(fs.children(ROOT_HANDLE).unwrap().is_empty());
}

#[test]
fn test_non_empty_directory_is_not_removed() {
    let mut fs = Filesystem::new(100);
    let d = fs.create_directory("d").unwrap();
    let f = fs.create_file_in(5, "f", d).unwrap();

    assert_eq!(fs.remove(d), Ok(false));
    assert!(fs.exists(d));
    assert!(fs.exists(f));

    assert_eq!(fs.remove(f), Ok(true));
    assert_eq!(fs.remove(d), Ok(true));
    assert_eq!(fs.get_available_size(), 100);
}

#[test]
fn test_root_cannot_be_removed_or_renamed() {
    let mut fs = Filesystem::new(10);
    assert_eq!(fs.remove(ROOT_HANDLE), Err(Error::InvalidHandle(ROOT_HANDLE)));
    assert_eq!(
        fs.rename(ROOT_HANDLE, "top"),
        Err(Error::InvalidHandle(ROOT_HANDLE))
    );
    assert_eq!(fs.get_absolute_path(ROOT_HANDLE).unwrap(), "/");
    assert_eq!(fs.get_handle("/"), Ok(ROOT_HANDLE));
}

#[test]
fn test_recycled_handle_is_reissued() {
    let mut fs = Filesystem::new(100);
    let old = fs.create_file(40, "old").unwrap();
    fs.remove(old).unwrap();

    let fresh = fs.create_directory("fresh").unwrap();
    assert_eq!(fresh, old);
    assert_eq!(fs.get_name(fresh).unwrap(), "fresh");
    assert_eq!(fs.get_file_size(fresh), Err(Error::InvalidHandle(fresh)));
    assert_eq!(fs.get_largest_file_handle(), Err(Error::HeapEmpty));
}
