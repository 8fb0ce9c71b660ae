//! C-интерфейс библиотеки
//!
//! Сканер передаётся наружу как непрозрачный указатель. Результат
//! сканирования - JSON-строка, которую вызывающий обязан освободить через
//! `muzloto_free_string`. Паника не пересекает границу: она превращается
//! в JSON с `success: false`.

use crate::ocr::FormScanner;
use muzloto_common::ScanResult;
use std::ffi::{c_char, c_int, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

/// Непрозрачный дескриптор сканера
pub struct MuzlotoScanner {
    inner: FormScanner,
}

/// Создать неинициализированный сканер
#[no_mangle]
pub extern "C" fn muzloto_create() -> *mut MuzlotoScanner {
    catch_unwind(|| {
        Box::into_raw(Box::new(MuzlotoScanner {
            inner: FormScanner::new(),
        }))
    })
    .unwrap_or(ptr::null_mut())
}

/// Уничтожить сканер и освободить движок OCR
///
/// # Safety
/// `scanner` - указатель из `muzloto_create` (или null), освобождается один раз.
#[no_mangle]
pub unsafe extern "C" fn muzloto_destroy(scanner: *mut MuzlotoScanner) {
    if scanner.is_null() {
        return;
    }
    let boxed = Box::from_raw(scanner);
    let _ = catch_unwind(AssertUnwindSafe(move || drop(boxed)));
}

/// Загрузить языковые данные. 1 - успех, 0 - ошибка.
///
/// # Safety
/// `scanner` - живой указатель из `muzloto_create`; `tessdata_path` - null
/// или строка UTF-8 с завершающим нулём.
#[no_mangle]
pub unsafe extern "C" fn muzloto_initialize(
    scanner: *mut MuzlotoScanner,
    tessdata_path: *const c_char,
) -> c_int {
    let Some(scanner) = scanner.as_mut() else {
        return 0;
    };
    let tessdata = c_str_to_string(tessdata_path);

    catch_unwind(AssertUnwindSafe(|| scanner.inner.initialize(tessdata.as_deref())))
        .map(|ok| ok as c_int)
        .unwrap_or(0)
}

/// Отсканировать анкету и вернуть результат в JSON
///
/// # Safety
/// `scanner` - живой указатель из `muzloto_create`; `image_path` - null или
/// строка с завершающим нулём. Результат освобождается `muzloto_free_string`.
#[no_mangle]
pub unsafe extern "C" fn muzloto_scan_image(
    scanner: *mut MuzlotoScanner,
    image_path: *const c_char,
) -> *mut c_char {
    let result = match scanner.as_mut() {
        Some(scanner) => {
            let path = c_str_to_string(image_path).unwrap_or_default();
            catch_unwind(AssertUnwindSafe(|| scanner.inner.scan_image(&path)))
                .unwrap_or_else(|_| ScanResult::failure("паника при сканировании", 0.0))
        }
        None => ScanResult::failure("Передан пустой указатель сканера", 0.0),
    };

    let json = result.to_json().unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "error_message": format!("Ошибка сериализации: {}", e),
            "processing_time_ms": 0.0,
        })
        .to_string()
    });

    CString::new(json)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

/// Освободить строку, полученную от `muzloto_scan_image`
///
/// # Safety
/// `s` - указатель из `muzloto_scan_image` (или null), освобождается один раз.
#[no_mangle]
pub unsafe extern "C" fn muzloto_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

unsafe fn c_str_to_string(s: *const c_char) -> Option<String> {
    if s.is_null() {
        return None;
    }
    Some(CStr::from_ptr(s).to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_str_to_string() {
        let owned = CString::new("/data/tessdata").unwrap();
        unsafe {
            assert_eq!(c_str_to_string(owned.as_ptr()).as_deref(), Some("/data/tessdata"));
            assert_eq!(c_str_to_string(ptr::null()), None);
        }
    }
}
