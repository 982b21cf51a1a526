//! Static source lists for the bootstrap target graph.
//!
//! Paths are relative to the source root and always use forward slashes.
//! Platform selection happens in [`crate::graph`]; this module is data only.

/// Directory scanned for the `gn_lib` sources.
pub const GN_LIB_DIR: &str = "tools/gn";

/// Entry point of the `gn` executable.
pub const GN_MAIN: &str = "tools/gn/gn_main.cc";

/// Files in [`GN_LIB_DIR`] that never go into `gn_lib`.
pub const GN_LIB_EXCLUDED: &[&str] = &[
    "run_all_unittests.cc",
    "test_with_scheduler.cc",
    "gn_main.cc",
];

/// Suffix of test sources skipped during discovery.
pub const UNITTEST_SUFFIX: &str = "_unittest.cc";

/// Plain C helpers archived on their own.
pub const DYNAMIC_ANNOTATIONS: &[&str] = &[
    "base/third_party/dynamic_annotations/dynamic_annotations.c",
    "base/third_party/superfasthash/superfasthash.c",
];

/// Platform-independent part of `base`.
pub const BASE: &[&str] = &[
    "base/allocator/allocator_check.cc",
    "base/allocator/allocator_extension.cc",
    "base/at_exit.cc",
    "base/base_paths.cc",
    "base/base_switches.cc",
    "base/callback_helpers.cc",
    "base/callback_internal.cc",
    "base/command_line.cc",
    "base/debug/activity_tracker.cc",
    "base/debug/alias.cc",
    "base/debug/crash_logging.cc",
    "base/debug/dump_without_crashing.cc",
    "base/debug/stack_trace.cc",
    "base/debug/task_annotator.cc",
    "base/debug/thread_heap_usage_tracker.cc",
    "base/environment.cc",
    "base/feature_list.cc",
    "base/files/file.cc",
    "base/files/file_enumerator.cc",
    "base/files/file_path.cc",
    "base/files/file_path_constants.cc",
    "base/files/file_tracing.cc",
    "base/files/file_util.cc",
    "base/files/important_file_writer.cc",
    "base/files/memory_mapped_file.cc",
    "base/files/scoped_file.cc",
    "base/hash.cc",
    "base/json/json_parser.cc",
    "base/json/json_reader.cc",
    "base/json/json_string_value_serializer.cc",
    "base/json/json_writer.cc",
    "base/json/string_escape.cc",
    "base/lazy_instance_helpers.cc",
    "base/location.cc",
    "base/logging.cc",
    "base/md5.cc",
    "base/memory/platform_shared_memory_region.cc",
    "base/memory/read_only_shared_memory_region.cc",
    "base/memory/ref_counted.cc",
    "base/memory/ref_counted_memory.cc",
    "base/memory/shared_memory_mapping.cc",
    "base/memory/shared_memory_handle.cc",
    "base/memory/shared_memory_tracker.cc",
    "base/memory/weak_ptr.cc",
    "base/message_loop/incoming_task_queue.cc",
    "base/message_loop/message_loop.cc",
    "base/message_loop/message_loop_current.cc",
    "base/message_loop/message_loop_task_runner.cc",
    "base/message_loop/message_pump.cc",
    "base/message_loop/message_pump_default.cc",
    "base/message_loop/watchable_io_message_pump_posix.cc",
    "base/metrics/bucket_ranges.cc",
    "base/metrics/dummy_histogram.cc",
    "base/metrics/field_trial.cc",
    "base/metrics/field_trial_param_associator.cc",
    "base/metrics/field_trial_params.cc",
    "base/metrics/histogram.cc",
    "base/metrics/histogram_base.cc",
    "base/metrics/histogram_functions.cc",
    "base/metrics/histogram_samples.cc",
    "base/metrics/histogram_snapshot_manager.cc",
    "base/metrics/metrics_hashes.cc",
    "base/metrics/persistent_histogram_allocator.cc",
    "base/metrics/persistent_memory_allocator.cc",
    "base/metrics/persistent_sample_map.cc",
    "base/metrics/sample_map.cc",
    "base/metrics/sample_vector.cc",
    "base/metrics/sparse_histogram.cc",
    "base/metrics/statistics_recorder.cc",
    "base/observer_list_threadsafe.cc",
    "base/path_service.cc",
    "base/pending_task.cc",
    "base/pickle.cc",
    "base/process/kill.cc",
    "base/process/memory.cc",
    "base/process/process_handle.cc",
    "base/process/process_iterator.cc",
    "base/process/process_metrics.cc",
    "base/rand_util.cc",
    "base/run_loop.cc",
    "base/sequence_token.cc",
    "base/sequence_checker_impl.cc",
    "base/sequenced_task_runner.cc",
    "base/sha1.cc",
    "base/strings/pattern.cc",
    "base/strings/string_number_conversions.cc",
    "base/strings/string_piece.cc",
    "base/strings/string_split.cc",
    "base/strings/string_util.cc",
    "base/strings/string_util_constants.cc",
    "base/strings/stringprintf.cc",
    "base/strings/utf_string_conversion_utils.cc",
    "base/strings/utf_string_conversions.cc",
    "base/synchronization/atomic_flag.cc",
    "base/synchronization/lock.cc",
    "base/sys_info.cc",
    "base/task_runner.cc",
    "base/task_scheduler/delayed_task_manager.cc",
    "base/task_scheduler/environment_config.cc",
    "base/task_scheduler/post_task.cc",
    "base/task_scheduler/priority_queue.cc",
    "base/task_scheduler/scheduler_lock_impl.cc",
    "base/task_scheduler/scheduler_single_thread_task_runner_manager.cc",
    "base/task_scheduler/scheduler_worker.cc",
    "base/task_scheduler/scheduler_worker_pool.cc",
    "base/task_scheduler/scheduler_worker_pool_impl.cc",
    "base/task_scheduler/scheduler_worker_pool_params.cc",
    "base/task_scheduler/scheduler_worker_stack.cc",
    "base/task_scheduler/scoped_set_task_priority_for_current_thread.cc",
    "base/task_scheduler/sequence.cc",
    "base/task_scheduler/sequence_sort_key.cc",
    "base/task_scheduler/service_thread.cc",
    "base/task_scheduler/task.cc",
    "base/task_scheduler/task_scheduler.cc",
    "base/task_scheduler/task_scheduler_impl.cc",
    "base/task_scheduler/task_tracker.cc",
    "base/task_scheduler/task_traits.cc",
    "base/third_party/dmg_fp/dtoa_wrapper.cc",
    "base/third_party/dmg_fp/g_fmt.cc",
    "base/third_party/icu/icu_utf.cc",
    "base/third_party/nspr/prtime.cc",
    "base/threading/post_task_and_reply_impl.cc",
    "base/threading/scoped_blocking_call.cc",
    "base/threading/sequence_local_storage_map.cc",
    "base/threading/sequenced_task_runner_handle.cc",
    "base/threading/simple_thread.cc",
    "base/threading/thread.cc",
    "base/threading/thread_checker_impl.cc",
    "base/threading/thread_collision_warner.cc",
    "base/threading/thread_id_name_manager.cc",
    "base/threading/thread_local_storage.cc",
    "base/threading/thread_restrictions.cc",
    "base/threading/thread_task_runner_handle.cc",
    "base/time/clock.cc",
    "base/time/default_clock.cc",
    "base/time/default_tick_clock.cc",
    "base/time/tick_clock.cc",
    "base/time/time.cc",
    "base/timer/elapsed_timer.cc",
    "base/timer/timer.cc",
    "base/trace_event/category_registry.cc",
    "base/trace_event/event_name_filter.cc",
    "base/trace_event/heap_profiler_allocation_context.cc",
    "base/trace_event/heap_profiler_allocation_context_tracker.cc",
    "base/trace_event/heap_profiler_event_filter.cc",
    "base/trace_event/heap_profiler_heap_dump_writer.cc",
    "base/trace_event/heap_profiler_serialization_state.cc",
    "base/trace_event/heap_profiler_stack_frame_deduplicator.cc",
    "base/trace_event/heap_profiler_type_name_deduplicator.cc",
    "base/trace_event/malloc_dump_provider.cc",
    "base/trace_event/memory_allocator_dump.cc",
    "base/trace_event/memory_allocator_dump_guid.cc",
    "base/trace_event/memory_dump_manager.cc",
    "base/trace_event/memory_dump_provider_info.cc",
    "base/trace_event/memory_dump_request_args.cc",
    "base/trace_event/memory_dump_scheduler.cc",
    "base/trace_event/memory_infra_background_whitelist.cc",
    "base/trace_event/memory_peak_detector.cc",
    "base/trace_event/memory_usage_estimator.cc",
    "base/trace_event/process_memory_dump.cc",
    "base/trace_event/trace_buffer.cc",
    "base/trace_event/trace_config.cc",
    "base/trace_event/trace_config_category_filter.cc",
    "base/trace_event/trace_event_argument.cc",
    "base/trace_event/trace_event_filter.cc",
    "base/trace_event/trace_event_impl.cc",
    "base/trace_event/trace_event_memory_overhead.cc",
    "base/trace_event/trace_log.cc",
    "base/trace_event/trace_log_constants.cc",
    "base/trace_event/tracing_agent.cc",
    "base/unguessable_token.cc",
    "base/value_iterators.cc",
    "base/values.cc",
    "base/vlog.cc",
];

pub const BASE_SHARED_MEMORY_WIN: &[&str] = &[
    "base/memory/platform_shared_memory_region_win.cc",
];

pub const BASE_SHARED_MEMORY_MAC: &[&str] = &[
    "base/memory/platform_shared_memory_region_mac.cc",
];

pub const BASE_SHARED_MEMORY_POSIX: &[&str] = &[
    "base/memory/platform_shared_memory_region_posix.cc",
];

/// `base` sources shared by every POSIX host.
pub const BASE_POSIX: &[&str] = &[
    "base/base_paths_posix.cc",
    "base/debug/debugger_posix.cc",
    "base/debug/stack_trace_posix.cc",
    "base/files/file_enumerator_posix.cc",
    "base/files/file_descriptor_watcher_posix.cc",
    "base/files/file_posix.cc",
    "base/files/file_util_posix.cc",
    "base/files/memory_mapped_file_posix.cc",
    "base/memory/shared_memory_helper.cc",
    "base/message_loop/message_pump_libevent.cc",
    "base/posix/file_descriptor_shuffle.cc",
    "base/posix/global_descriptors.cc",
    "base/posix/safe_strerror.cc",
    "base/process/kill_posix.cc",
    "base/process/process_handle_posix.cc",
    "base/process/process_metrics_posix.cc",
    "base/process/process_posix.cc",
    "base/rand_util_posix.cc",
    "base/strings/string16.cc",
    "base/synchronization/condition_variable_posix.cc",
    "base/synchronization/lock_impl_posix.cc",
    "base/sys_info_posix.cc",
    "base/task_scheduler/task_tracker_posix.cc",
    "base/threading/platform_thread_internal_posix.cc",
    "base/threading/platform_thread_posix.cc",
    "base/threading/thread_local_storage_posix.cc",
    "base/time/time_conversion_posix.cc",
];

/// Portable libevent core with the poll and select backends.
pub const LIBEVENT: &[&str] = &[
    "base/third_party/libevent/buffer.c",
    "base/third_party/libevent/evbuffer.c",
    "base/third_party/libevent/evdns.c",
    "base/third_party/libevent/event.c",
    "base/third_party/libevent/event_tagging.c",
    "base/third_party/libevent/evrpc.c",
    "base/third_party/libevent/evutil.c",
    "base/third_party/libevent/http.c",
    "base/third_party/libevent/log.c",
    "base/third_party/libevent/poll.c",
    "base/third_party/libevent/select.c",
    "base/third_party/libevent/signal.c",
    "base/third_party/libevent/strlcpy.c",
];

pub const XDG_USER_DIRS: &[&str] = &[
    "base/third_party/xdg_user_dirs/xdg_user_dir_lookup.cc",
];

pub const BASE_LINUX_AIX: &[&str] = &[
    "base/memory/shared_memory_handle_posix.cc",
    "base/memory/shared_memory_posix.cc",
    "base/nix/xdg_util.cc",
    "base/process/internal_linux.cc",
    "base/process/memory_linux.cc",
    "base/process/process_handle_linux.cc",
    "base/process/process_info_linux.cc",
    "base/process/process_iterator_linux.cc",
    "base/process/process_linux.cc",
    "base/process/process_metrics_linux.cc",
    "base/strings/sys_string_conversions_posix.cc",
    "base/synchronization/waitable_event_posix.cc",
    "base/sys_info_linux.cc",
    "base/time/time_exploded_posix.cc",
    "base/time/time_now_posix.cc",
    "base/threading/platform_thread_linux.cc",
];

pub const BASE_LINUX: &[&str] = &[
    "base/allocator/allocator_shim.cc",
    "base/allocator/allocator_shim_default_dispatch_to_glibc.cc",
];

pub const LIBEVENT_LINUX: &[&str] = &[
    "base/third_party/libevent/epoll.c",
];

pub const BASE_AIX: &[&str] = &[
    "base/process/internal_aix.cc",
];

pub const BASE_MAC: &[&str] = &[
    "base/base_paths_mac.mm",
    "base/files/file_util_mac.mm",
    "base/mac/bundle_locations.mm",
    "base/mac/call_with_eh_frame.cc",
    "base/mac/call_with_eh_frame_asm.S",
    "base/mac/foundation_util.mm",
    "base/mac/mach_logging.cc",
    "base/mac/scoped_mach_port.cc",
    "base/mac/scoped_mach_vm.cc",
    "base/mac/scoped_nsautorelease_pool.mm",
    "base/memory/shared_memory_handle_mac.cc",
    "base/memory/shared_memory_mac.cc",
    "base/message_loop/message_pump_mac.mm",
    "base/process/process_handle_mac.cc",
    "base/process/process_info_mac.cc",
    "base/process/process_iterator_mac.cc",
    "base/process/process_metrics_mac.cc",
    "base/strings/sys_string_conversions_mac.mm",
    "base/synchronization/waitable_event_mac.cc",
    "base/sys_info_mac.mm",
    "base/time/time_exploded_posix.cc",
    "base/time/time_mac.cc",
    "base/threading/platform_thread_mac.mm",
];

pub const LIBEVENT_MAC: &[&str] = &[
    "base/third_party/libevent/kqueue.c",
];

pub const BASE_WIN: &[&str] = &[
    "base/allocator/partition_allocator/address_space_randomization.cc",
    "base/allocator/partition_allocator/page_allocator.cc",
    "base/allocator/partition_allocator/spin_lock.cc",
    "base/base_paths_win.cc",
    "base/cpu.cc",
    "base/debug/close_handle_hook_win.cc",
    "base/debug/debugger.cc",
    "base/debug/debugger_win.cc",
    "base/debug/profiler.cc",
    "base/debug/stack_trace_win.cc",
    "base/file_version_info_win.cc",
    "base/files/file_enumerator_win.cc",
    "base/files/file_path_watcher_win.cc",
    "base/files/file_util_win.cc",
    "base/files/file_win.cc",
    "base/files/memory_mapped_file_win.cc",
    "base/guid.cc",
    "base/logging_win.cc",
    "base/memory/memory_pressure_monitor_win.cc",
    "base/memory/shared_memory_handle_win.cc",
    "base/memory/shared_memory_win.cc",
    "base/message_loop/message_pump_win.cc",
    "base/native_library_win.cc",
    "base/power_monitor/power_monitor_device_source_win.cc",
    "base/process/kill_win.cc",
    "base/process/launch_win.cc",
    "base/process/memory_win.cc",
    "base/process/process_handle_win.cc",
    "base/process/process_info_win.cc",
    "base/process/process_iterator_win.cc",
    "base/process/process_metrics_win.cc",
    "base/process/process_win.cc",
    "base/profiler/native_stack_sampler_win.cc",
    "base/profiler/win32_stack_frame_unwinder.cc",
    "base/rand_util_win.cc",
    "base/strings/sys_string_conversions_win.cc",
    "base/sync_socket_win.cc",
    "base/synchronization/condition_variable_win.cc",
    "base/synchronization/lock_impl_win.cc",
    "base/synchronization/waitable_event_watcher_win.cc",
    "base/synchronization/waitable_event_win.cc",
    "base/sys_info_win.cc",
    "base/threading/platform_thread_win.cc",
    "base/threading/thread_local_storage_win.cc",
    "base/time/time_win.cc",
    "base/timer/hi_res_timer_manager_win.cc",
    "base/trace_event/trace_event_etw_export_win.cc",
    "base/win/core_winrt_util.cc",
    "base/win/enum_variant.cc",
    "base/win/event_trace_controller.cc",
    "base/win/event_trace_provider.cc",
    "base/win/i18n.cc",
    "base/win/iat_patch_function.cc",
    "base/win/iunknown_impl.cc",
    "base/win/message_window.cc",
    "base/win/object_watcher.cc",
    "base/win/pe_image.cc",
    "base/win/process_startup_helper.cc",
    "base/win/registry.cc",
    "base/win/resource_util.cc",
    "base/win/scoped_bstr.cc",
    "base/win/scoped_com_initializer.cc",
    "base/win/scoped_handle.cc",
    "base/win/scoped_handle_verifier.cc",
    "base/win/scoped_process_information.cc",
    "base/win/scoped_variant.cc",
    "base/win/scoped_winrt_initializer.cc",
    "base/win/shortcut.cc",
    "base/win/startup_information.cc",
    "base/win/wait_chain.cc",
    "base/win/win_util.cc",
    "base/win/windows_version.cc",
    "base/win/wrapped_window_proc.cc",
];

/// System libraries for the final link on Linux.
pub const SYSTEM_LIBS_LINUX: &[&str] = &["-lc", "-lgcc_s", "-lm", "-lpthread", "-lrt", "-latomic"];

pub const SYSTEM_LIBS_AIX: &[&str] = &["-lrt"];

pub const SYSTEM_LIBS_MAC: &[&str] = &[
    "-framework",
    "AppKit",
    "-framework",
    "CoreFoundation",
    "-framework",
    "Foundation",
    "-framework",
    "Security",
];

/// Import libraries for the final link on Windows.
pub const SYSTEM_LIBS_WIN: &[&str] = &[
    "advapi32.lib",
    "dbghelp.lib",
    "kernel32.lib",
    "ole32.lib",
    "shell32.lib",
    "user32.lib",
    "userenv.lib",
    "version.lib",
    "winmm.lib",
    "ws2_32.lib",
    "Shlwapi.lib",
];
